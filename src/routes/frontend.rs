//! 前端静态资源路由
//!
//! 使用 rust-embed 嵌入前端构建产物，支持：
//! - 页面外壳 index.html（由 `utils::view` 在浏览器请求时返回）
//! - 自定义前端目录覆盖（开发用）
//! - %BASE_PATH% 占位符替换

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::NotFoundPage;
use crate::utils::view::render_with_status;

/// 嵌入前端静态资源
/// 编译时从 frontend/dist/ 目录读取文件
#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "webp" => "image/webp",
        "webm" => "video/webm",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "xml" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        "map" => "application/json",
        _ => "application/octet-stream",
    }
}

/// 检查是否应该设置缓存
fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    // 静态资源（带 hash 的）可以长期缓存
    matches!(
        ext,
        "js" | "css"
            | "woff"
            | "woff2"
            | "ttf"
            | "eot"
            | "png"
            | "jpg"
            | "jpeg"
            | "gif"
            | "svg"
            | "webp"
    )
}

/// 处理 HTML 文件中的占位符替换
fn process_html(content: &[u8], config: &AppConfig) -> Vec<u8> {
    let html = String::from_utf8_lossy(content);
    html.replace("%BASE_PATH%", "")
        .replace("%SYSTEM_NAME%", &config.app.system_name)
        .into_bytes()
}

/// 尝试从自定义目录读取文件（开发用）
fn try_custom_file(path: &str) -> Option<Vec<u8>> {
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }
    let custom_path = format!("./frontend-custom/{}", path);
    std::fs::read(&custom_path).ok()
}

/// 尝试从嵌入的资源中获取文件
fn get_embedded_file(path: &str) -> Option<Vec<u8>> {
    FrontendAssets::get(path).map(|f| f.data.to_vec())
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
fn get_file(path: &str) -> Option<Vec<u8>> {
    try_custom_file(path).or_else(|| get_embedded_file(path))
}

/// 页面外壳，浏览器导航请求统一返回它
pub fn index_response(status: StatusCode) -> HttpResponse {
    match get_file("index.html") {
        Some(data) => HttpResponse::build(status)
            .content_type(get_mime_type("index.html"))
            .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
            .body(process_html(&data, AppConfig::get())),
        None => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>EducaMais</title>
</head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The frontend assets have not been built or embedded.</p>
    <pre>cd frontend && bun run build</pre>
</body>
</html>"#,
            ),
    }
}

/// 静态资源请求处理；找不到文件时渲染 404 页面
pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    if !path.is_empty()
        && path != "index.html"
        && let Some(data) = get_file(path)
    {
        let mime = get_mime_type(path);
        let mut response = HttpResponse::Ok();
        response.content_type(mime);

        // 设置缓存头
        if should_cache(path) {
            response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
        } else {
            response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
        }
        return Ok(response.body(data));
    }

    Ok(render_with_status(
        &req,
        StatusCode::NOT_FOUND,
        "nao-encontrado",
        NotFoundPage {
            path: req.path().to_string(),
        },
    ))
}

/// 配置前端路由（放在最后作为 fallback）
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("app.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("image.png"), "image/png");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[actix_web::test]
    async fn test_unknown_path_renders_not_found_view() {
        crate::test_support::init_config();
        let app = actix_web::test::init_service(
            actix_web::App::new().configure(configure_frontend_routes),
        )
        .await;
        let req = actix_web::test::TestRequest::get()
            .uri("/nada/aqui")
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["view"], "nao-encontrado");
        assert_eq!(body["model"]["path"], "/nada/aqui");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("app.js"));
        assert!(should_cache("style.css"));
        assert!(should_cache("logo.png"));
        assert!(!should_cache("index.html"));
        assert!(!should_cache("manifest.json"));
    }
}
