use std::sync::OnceLock;
use tera::Tera;

static TERA: OnceLock<Tera> = OnceLock::new();

/// Process-wide template registry, loaded once from `templates/`.
pub fn get_tera() -> &'static Tera {
    TERA.get_or_init(|| Tera::new("templates/**/*.html").expect("Failed to load templates"))
}
