use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use escola_cli::seeder;

#[derive(Parser)]
#[command(name = "escola-cli")]
#[command(about = "Escola CLI - Administrative tools for the Escola API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin usuario
    CreateAdmin {
        /// Nome of the admin
        #[arg(short = 'n', long)]
        nome: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Senha (will be prompted securely if not provided)
        #[arg(short = 's', long)]
        senha: Option<String>,
    },
    /// Seed the database with fake turmas and alunos
    Seed {
        /// Number of turmas to create
        #[arg(short = 't', long, default_value = "5")]
        turmas: usize,

        /// Number of alunos to create
        #[arg(short = 'a', long, default_value = "100")]
        alunos: usize,
    },
    /// Seed only turmas
    SeedTurmas {
        /// Number of turmas to create
        #[arg(short = 't', long, default_value = "5")]
        turmas: usize,
    },
    /// Seed alunos distributed across existing turmas
    SeedAlunos {
        /// Number of alunos to create
        #[arg(short = 'a', long, default_value = "100")]
        alunos: usize,
    },
    /// Clear all seeded data (keeps usuarios)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin { nome, email, senha } => {
            handle_create_admin(&pool, nome, email, senha).await
        }
        Commands::Seed { turmas, alunos } => handle_seed(&pool, turmas, alunos).await,
        Commands::SeedTurmas { turmas } => handle_seed_turmas(&pool, turmas).await,
        Commands::SeedAlunos { alunos } => handle_seed_alunos(&pool, alunos).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn handle_create_admin(
    pool: &sqlx::postgres::PgPool,
    nome: Option<String>,
    email: Option<String>,
    senha: Option<String>,
) {
    let nome = nome.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Nome")
            .interact_text()
            .expect("Failed to read nome")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let senha = senha.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Senha")
            .with_confirmation("Confirm senha", "Senhas don't match")
            .interact()
            .expect("Failed to read senha")
    });

    match create_admin_internal(pool, &nome, &email, &senha).await {
        Ok(_) => {
            println!("\n✅ Admin usuario created successfully!");
            println!("   Email: {}", email);
            println!("   Nome: {}", nome);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin usuario: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &sqlx::postgres::PgPool, turmas: usize, alunos: usize) {
    match seeder::seed_all(pool, turmas, alunos).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed_turmas(pool: &sqlx::postgres::PgPool, turmas: usize) {
    match seeder::seed_turmas(pool, turmas).await {
        Ok(slots) => {
            println!("✅ Created {} turmas", slots.len());
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding turmas: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed_alunos(pool: &sqlx::postgres::PgPool, alunos: usize) {
    // Distribute over whatever turmas already exist
    let rows = sqlx::query_as::<_, (uuid::Uuid, i32)>(
        "SELECT id, capacidade FROM turmas ORDER BY nome",
    )
    .fetch_all(pool)
    .await
    .expect("Failed to fetch turmas");

    if rows.is_empty() {
        eprintln!("❌ No turmas found. Run `seed-turmas` first.");
        std::process::exit(1);
    }

    let slots: Vec<seeder::TurmaSlot> = rows
        .into_iter()
        .map(|(id, capacidade)| seeder::TurmaSlot { id, capacidade })
        .collect();

    match seeder::seed_alunos(pool, &slots, alunos).await {
        Ok(_) => {
            println!("✅ Created {} alunos", alunos);
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding alunos: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_seed(pool: &sqlx::postgres::PgPool) {
    match seeder::clear_all(pool).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("\n❌ Error clearing seeded data: {}", e);
            std::process::exit(1);
        }
    }
}

/// Creates an admin usuario (internal CLI function).
async fn create_admin_internal(
    db: &sqlx::postgres::PgPool,
    nome: &str,
    email: &str,
    senha: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use escola_core::hash_password;

    let senha_hash =
        hash_password(senha).map_err(|e| format!("Failed to hash senha: {}", e.error))?;

    let inserted = sqlx::query_scalar::<_, uuid::Uuid>(
        "INSERT INTO usuarios (nome, email, senha)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(nome)
    .bind(email)
    .bind(&senha_hash)
    .fetch_optional(db)
    .await?;

    if inserted.is_none() {
        return Err("Usuario with this email already exists".into());
    }

    Ok(())
}
