//! End-to-end runs of the CLI commands against temporary directories

use std::fs;
use std::path::{Path, PathBuf};

use tablegen::{archive, Category, GenerationRequest};
use tablegen_cli_lib::{
    read_request, ContextCommand, DownloadCommand, GenerateCommand, GeneratorOptions,
    ImportCommand, InspectCommand, PreviewCommand, PreviewOutput, TemplatesCommand,
};

const ARTICLE: &str = r#"{
  "name": "article",
  "comment": "文章（内容）",
  "fields": [
    { "name": "id", "type": "text", "primaryKey": true },
    { "name": "title", "type": "text", "comment": "标题" },
    { "name": "content", "type": "editor", "comment": "内容" },
    { "name": "create_time", "type": "autodate" }
  ]
}"#;

/// Options pointing at an explicit, empty config file
fn options(dir: &Path) -> GeneratorOptions {
    let config = dir.join("tablegen.toml");
    fs::write(&config, "").unwrap();
    GeneratorOptions {
        config: Some(config),
        templates: None,
    }
}

fn imported_request(dir: &Path) -> PathBuf {
    let table = dir.join("article.json");
    fs::write(&table, ARTICLE).unwrap();
    let request = dir.join("article.request.json");
    ImportCommand::new(table, Some(request.clone()), options(dir))
        .execute()
        .unwrap();
    request
}

#[test]
fn test_import_writes_request() {
    let dir = tempfile::tempdir().unwrap();
    let request = read_request(&imported_request(dir.path())).unwrap();

    assert_eq!(request.name, "article");
    assert_eq!(request.module_name, "system");
    assert_eq!(request.category, Category::Crud);
    assert_eq!(request.fields.len(), 4);
}

#[test]
fn test_import_overrides_config_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("article.json");
    fs::write(&table, ARTICLE).unwrap();

    let config = dir.path().join("tablegen.toml");
    fs::write(&config, "[defaults]\nmodule_name = \"cms\"\n").unwrap();
    let options = GeneratorOptions {
        config: Some(config),
        templates: None,
    };

    let from_config = ImportCommand::new(table.clone(), None, options.clone())
        .request()
        .unwrap();
    assert_eq!(from_config.module_name, "cms");

    let overridden = ImportCommand::new(table, None, options)
        .with_module(Some("blog".to_string()))
        .with_category(Some(Category::Tree))
        .request()
        .unwrap();
    assert_eq!(overridden.module_name, "blog");
    assert_eq!(overridden.category, Category::Tree);
}

#[test]
fn test_import_rejects_invalid_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("broken.json");
    fs::write(&table, "[1, 2, 3]").unwrap();

    let err = ImportCommand::new(table, None, options(dir.path()))
        .request()
        .unwrap_err();
    assert!(err.to_string().contains("Invalid table description"));
}

#[test]
fn test_preview_lists_output_paths() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());

    let paths = PreviewCommand::new(request, PreviewOutput::Paths, false, options(dir.path()))
        .render()
        .unwrap();
    assert_eq!(
        paths.lines().collect::<Vec<_>>(),
        [
            "sql/article_menu.sql",
            "vue/api/system/article/index.ts",
            "vue/api/system/article/model.d.ts",
            "vue/views/system/article/index.vue",
            "vue/views/system/article/popup.vue",
            "vue/views/system/article/data.ts",
        ]
    );
}

#[test]
fn test_preview_source_names_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());

    let json = PreviewCommand::new(request, PreviewOutput::Json, true, options(dir.path()))
        .render()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let names: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(names.len(), 6);
    assert!(names.contains(&"vue/views/system/article/index.vue.jinja".to_string()));
    assert!(names.iter().all(|n| n.ends_with(".jinja")));
}

#[test]
fn test_preview_show_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());

    let show = |path: &str| {
        PreviewCommand::new(
            request.clone(),
            PreviewOutput::Show(path.to_string()),
            false,
            options(dir.path()),
        )
        .render()
    };

    let api = show("vue/api/system/article/index.ts").unwrap();
    assert!(api.contains("articleList"));

    let err = show("vue/api/system/article/missing.ts").unwrap_err();
    assert!(err.to_string().contains("is not generated"));
}

#[test]
fn test_generate_writes_tree() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());
    let out = dir.path().join("out");

    let written = GenerateCommand::new(request.clone(), out.clone(), false, options(dir.path()))
        .execute()
        .unwrap();
    assert_eq!(written.len(), 6);
    assert!(out.join("sql/article_menu.sql").is_file());
    assert!(out.join("vue/views/system/article/index.vue").is_file());

    let api = fs::read_to_string(out.join("vue/api/system/article/index.ts")).unwrap();
    assert!(api.contains("articleList"));
}

#[test]
fn test_generate_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());
    let out = dir.path().join("out");
    let menu = out.join("sql/article_menu.sql");
    fs::create_dir_all(menu.parent().unwrap()).unwrap();
    fs::write(&menu, "keep me").unwrap();

    let err = GenerateCommand::new(request.clone(), out.clone(), false, options(dir.path()))
        .execute()
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(&menu).unwrap(), "keep me");
    assert!(!out.join("vue").exists());

    GenerateCommand::new(request, out, true, options(dir.path()))
        .execute()
        .unwrap();
    assert_ne!(fs::read_to_string(&menu).unwrap(), "keep me");
}

#[test]
fn test_generate_with_template_override() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("{businessName}.txt.jinja"), "{{ BusinessName }}").unwrap();

    let mut options = options(dir.path());
    options.templates = Some(templates);
    let out = dir.path().join("out");

    GenerateCommand::new(request, out.clone(), false, options)
        .execute()
        .unwrap();
    assert_eq!(fs::read_to_string(out.join("article.txt")).unwrap(), "Article");
}

#[tokio::test]
async fn test_download_writes_archive() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());
    let zip = dir.path().join("article.zip");

    let path = DownloadCommand::new(request.clone(), Some(zip.clone()), options(dir.path()))
        .execute()
        .await
        .unwrap();
    assert_eq!(path, zip);

    let files = archive::unpack(&fs::read(&zip).unwrap()).unwrap();
    assert_eq!(files.len(), 6);
    assert!(files.contains("vue/views/system/article/data.ts"));
}

#[tokio::test]
async fn test_download_failure_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());
    let zip = dir.path().join("missing").join("article.zip");

    let err = DownloadCommand::new(request, Some(zip.clone()), options(dir.path()))
        .execute()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to write archive"));
    assert!(!zip.exists());
}

#[test]
fn test_templates_lists_by_category() {
    let dir = tempfile::tempdir().unwrap();

    let all = TemplatesCommand::new(None, options(dir.path())).render().unwrap();
    assert!(all.contains("8 templates"));

    let tree = TemplatesCommand::new(Some(Category::Tree), options(dir.path()))
        .render()
        .unwrap();
    assert!(tree.contains("6 templates"));
    assert!(tree.contains("tree_popup.vue.jinja"));
    assert!(!tree.contains("crud_popup.vue.jinja"));
}

#[tokio::test]
async fn test_inspect_lists_archive_entries() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());
    let zip = dir.path().join("article.zip");
    DownloadCommand::new(request, Some(zip.clone()), options(dir.path()))
        .execute()
        .await
        .unwrap();

    let listing = InspectCommand::new(zip).render().unwrap();
    assert!(listing.contains("vue/views/system/article/popup.vue"));
    assert!(listing.contains("entries"));
    assert_eq!(listing.lines().count(), 7);
}

#[test]
fn test_inspect_rejects_non_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.zip");
    fs::write(&path, "not a zip").unwrap();

    let err = InspectCommand::new(path).render().unwrap_err();
    assert!(err.to_string().contains("Invalid archive"));
}

#[test]
fn test_context_and_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let request = imported_request(dir.path());

    let context = ContextCommand::new(request.clone(), None).render().unwrap();
    let value: serde_json::Value = serde_json::from_str(&context).unwrap();
    assert_eq!(value["BusinessName"], "Article");
    assert_eq!(value["permissionPrefix"], "system:article");

    let path = ContextCommand::new(
        request,
        Some("vue/{module_name}/{businessName}/{missing}".to_string()),
    )
    .render()
    .unwrap();
    assert_eq!(path, "vue/system/article/{missing}");
}

#[test]
fn test_read_request_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = read_request(&path).unwrap_err();
    assert!(err.to_string().contains("nope.json"));

    fs::write(&path, serde_json::to_string(&GenerationRequest::default()).unwrap()).unwrap();
    assert!(read_request(&path).is_ok());
}
