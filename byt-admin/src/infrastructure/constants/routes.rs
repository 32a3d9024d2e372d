macro_rules! usuarios_path {
    ($path:literal) => {
        concat!("/usuarios", $path)
    };
}

/// `/usuarios` API route definitions
pub mod usuarios {
    pub const LIST: &str = usuarios_path!("/");
    pub const ITEM: &str = usuarios_path!("/{id}");
    pub const CREATE: &str = usuarios_path!("/crear");
    pub const UPDATE: &str = usuarios_path!("/{id}/editar");
    pub const DELETE: &str = usuarios_path!("/{id}/eliminar");
}

/// Helper utilities for working with route templates
pub mod utils {
    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_routes_substitute_the_id() {
        assert_eq!(
            utils::replace_param(usuarios::UPDATE, "{id}", "5"),
            "/usuarios/5/editar"
        );
        assert_eq!(
            utils::replace_param(usuarios::DELETE, "{id}", "5"),
            "/usuarios/5/eliminar"
        );
        assert_eq!(usuarios::LIST, "/usuarios/");
    }
}
