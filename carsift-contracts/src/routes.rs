macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions consumed by the acquisition client.
pub mod v1 {
    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    pub mod media {
        pub const COUNT: &str = v1_path!("/media-count/{entity_key}");
        pub const ASSET: &str = v1_path!("/media-asset/{entity_key}/{index}");
        pub const THUMBNAIL: &str = v1_path!("/thumbnail/{entity_key}");
    }

    pub mod acquisition {
        pub const TRIGGER: &str = v1_path!("/acquire-media");
        pub const PROGRESS: &str =
            v1_path!("/acquisition-progress/{entity_key}");
    }
}

pub mod utils {
    /// Replace a single path parameter (e.g. `"{entity_key}"`) with the
    /// provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Replace multiple path parameters in order.
    pub fn replace_params(
        route: &str,
        params: &[(impl AsRef<str>, impl AsRef<str>)],
    ) -> String {
        let mut path = route.to_string();
        for (param, value) in params {
            path = path.replace(param.as_ref(), value.as_ref());
        }
        path
    }
}
