pub use escola_models::usuarios::*;
