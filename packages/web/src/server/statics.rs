use axum::http::{header, HeaderValue};
use axum::Router;
use site::config::ServerConfig;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;

/// Directories mounted under their own name.
pub const STATIC_DIRS: [&str; 5] = ["assets", "favicons", "fonts", "images", "i18n"];
/// Files served from the root of the static directory.
pub const ROOT_FILES: [&str; 5] = [
    "robots.txt",
    "favicon.ico",
    "apple-touch-icon.png",
    "site.webmanifest",
    "404-logo.svg",
];

/// Client entry files a development build writes into the public directory.
/// Mounted even before the first build so they 404 instead of redirecting.
pub const DEV_ENTRY_FILES: [&str; 2] = ["app.js", "app_bg.wasm"];

const STATIC_CACHE: &str = "public, max-age=31536000";

/// Routes for whatever exists in the static directory at startup.
pub fn routes<S>(config: &ServerConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let root = config.static_dir();
    let dev = config.mode.is_dev();
    let mut router = Router::new();

    for name in STATIC_DIRS {
        let dir = root.join(name);
        if !dir.is_dir() {
            continue;
        }
        let service = ServeDir::new(dir).precompressed_br().precompressed_gzip();
        let cache = if dev { "no-store" } else { STATIC_CACHE };
        router = router.nest_service(
            &format!("/{name}"),
            tower::ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static(cache),
                ))
                .service(service),
        );
    }

    for name in ROOT_FILES {
        let file = root.join(name);
        if file.is_file() {
            router = router.route_service(&format!("/{name}"), ServeFile::new(file));
        }
    }

    if dev {
        for name in DEV_ENTRY_FILES {
            router = router.route_service(
                &format!("/{name}"),
                tower::ServiceBuilder::new()
                    .layer(SetResponseHeaderLayer::overriding(
                        header::CACHE_CONTROL,
                        HeaderValue::from_static("no-store"),
                    ))
                    .service(ServeFile::new(root.join(name))),
            );
        }
    }

    router
}
