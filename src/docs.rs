use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use escola_core::PaginationMeta;

use crate::modules::alunos::model::{
    AlunoResponse, CreateAlunoDto, PaginatedAlunosResponse, StatusAluno, UpdateAlunoDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto, Usuario,
};
use crate::modules::matriculas::model::{MatriculaRequest, MatriculaResponse};
use crate::modules::turmas::model::{
    CreateTurmaDto, PaginatedTurmasResponse, Turma, TurmaComOcupacao, UpdateTurmaDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_usuario,
        crate::modules::auth::controller::login_usuario,
        crate::modules::auth::controller::get_profile,
        crate::modules::turmas::controller::create_turma,
        crate::modules::turmas::controller::get_turmas,
        crate::modules::turmas::controller::get_turma,
        crate::modules::turmas::controller::update_turma,
        crate::modules::turmas::controller::delete_turma,
        crate::modules::alunos::controller::create_aluno,
        crate::modules::alunos::controller::get_alunos,
        crate::modules::alunos::controller::get_aluno,
        crate::modules::alunos::controller::update_aluno,
        crate::modules::alunos::controller::delete_aluno,
        crate::modules::alunos::export::export_alunos,
        crate::modules::matriculas::controller::matricular_aluno,
    ),
    components(
        schemas(
            Usuario,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorResponse,
            Turma,
            TurmaComOcupacao,
            CreateTurmaDto,
            UpdateTurmaDto,
            PaginatedTurmasResponse,
            StatusAluno,
            AlunoResponse,
            CreateAlunoDto,
            UpdateAlunoDto,
            PaginatedAlunosResponse,
            MatriculaRequest,
            MatriculaResponse,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Usuario authentication endpoints"),
        (name = "Turmas", description = "Turma management endpoints"),
        (name = "Alunos", description = "Aluno management and CSV export endpoints"),
        (name = "Matriculas", description = "Enrollment endpoints")
    ),
    info(
        title = "Escola API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for managing turmas, alunos and matrículas with JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
