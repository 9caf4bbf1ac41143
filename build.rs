use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.join("index.html").exists() {
        println!("cargo:warning=frontend/dist not found, embedding the minimal page shell");
        println!("cargo:warning=build the frontend with: cd frontend && bun install && bun run build");

        write_fallback_shell(&dist_path);
    }
}

// 最小页面壳：以 JSON 方式重新请求当前地址并展示视图模型
fn write_fallback_shell(dist_path: &Path) {
    fs::create_dir_all(dist_path.join("assets")).expect("Failed to create dist directory");

    let shell = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>%SYSTEM_NAME%</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 960px; margin: 40px auto; padding: 0 16px; }
        .flash { padding: 12px 16px; border-radius: 6px; margin-bottom: 16px; }
        .flash.success { background: #e6f4ea; }
        .flash.error { background: #fdecea; }
        .flash.info { background: #e8f0fe; }
        pre { background: #f6f8fa; padding: 16px; border-radius: 6px; overflow: auto; }
    </style>
</head>
<body>
    <header><a href="/">%SYSTEM_NAME%</a> | <a href="/cursos">Cursos</a> | <a href="/perfil">Perfil</a></header>
    <main id="app"><p>Carregando...</p></main>
    <script>
        fetch(window.location.href, { headers: { Accept: "application/json" }, credentials: "same-origin" })
            .then((res) => res.json())
            .then((page) => {
                const app = document.getElementById("app");
                app.innerHTML = "";
                if (page.flash) {
                    const flash = document.createElement("div");
                    flash.className = "flash " + page.flash.kind;
                    flash.textContent = page.flash.message;
                    app.appendChild(flash);
                }
                const title = document.createElement("h1");
                title.textContent = page.view;
                app.appendChild(title);
                const model = document.createElement("pre");
                model.textContent = JSON.stringify(page.model, null, 2);
                app.appendChild(model);
            });
    </script>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), shell).expect("Failed to write fallback index.html");
    fs::write(dist_path.join("favicon.ico"), []).expect("Failed to write fallback favicon");
}
