use chomping::loader::read_recipe_path;
use chomping::{
    upload_recipe_file, ChompError, RecipeUploader, Store, Table, UploadResult,
};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[tokio::test]
async fn test_upload_recipe_file_to_new_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("chomping.db");

    let summary = upload_recipe_file(&fixture("soda-bread.json"), &db_path)
        .await
        .unwrap();
    assert_eq!(summary.ingredient_ids.len(), 4);
    assert_eq!(summary.steps_without_annotations, vec![0, 3]);

    let store = Store::open(&db_path).unwrap();
    assert_eq!(store.count(Table::Ingredient).unwrap(), 4);
    let name: String = store
        .conn()
        .query_row(
            "SELECT name FROM ingredient WHERE id = ?1",
            [summary.ingredient_ids[3]],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(name, "buttermilk");
}

#[tokio::test]
async fn test_reupload_returns_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("chomping.db");

    let first = upload_recipe_file(&fixture("soda-bread.json"), &db_path)
        .await
        .unwrap();
    let second = upload_recipe_file(&fixture("soda-bread.json"), &db_path)
        .await
        .unwrap();
    assert_eq!(first, second);

    let store = Store::open(&db_path).unwrap();
    assert_eq!(store.count(Table::Recipe).unwrap(), 1);
    assert_eq!(store.count(Table::Contributor).unwrap(), 1);
    assert_eq!(store.count(Table::Ingredient).unwrap(), 4);
}

#[tokio::test]
async fn test_builder_parse_only() {
    let result = RecipeUploader::builder()
        .recipe_path(fixture("soda-bread.json"))
        .parse_only()
        .build()
        .await
        .unwrap();

    match result {
        UploadResult::Parsed(steps) => {
            assert_eq!(steps.len(), 4);
            assert!(!steps[0].has_annotations());
            let names: Vec<&str> = steps[1].ingredients().iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["plain flour", "bicarbonate of soda", "salt"]);
            assert_eq!(steps[2].ingredients()[0].quantity, 400.0);
        }
        UploadResult::Uploaded(_) => panic!("Expected Parsed result"),
    }
}

#[tokio::test]
async fn test_builder_uploads_by_name_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("recipes.db");

    let result = RecipeUploader::builder()
        .data_dir(fixture(""))
        .recipe("soda-bread")
        .database(&db_path)
        .init_schema()
        .build()
        .await
        .unwrap();

    match result {
        UploadResult::Uploaded(summary) => assert_eq!(summary.ingredient_ids.len(), 4),
        UploadResult::Parsed(_) => panic!("Expected Uploaded result"),
    }
    assert!(db_path.exists());
}

/// Copy the bundled queries into `dir` so individual files can be replaced
fn copy_builtin_queries(dir: &Path) {
    let sql = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sql");
    for entry in fs::read_dir(sql).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_owned();
        if name != "schema.sql" {
            fs::copy(&path, dir.join(name)).unwrap();
        }
    }
}

#[tokio::test]
async fn test_builder_with_sql_dir_overrides() {
    let queries = tempfile::tempdir().unwrap();
    copy_builtin_queries(queries.path());
    fs::write(
        queries.path().join("match_method.sql"),
        "SELECT id FROM method WHERE lower(name) = lower(?1);",
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("chomping.db");
    let mut document = read_recipe_path(&fixture("soda-bread.json")).await.unwrap();

    let first = RecipeUploader::builder()
        .document(document.clone())
        .database(&db_path)
        .sql_dir(queries.path())
        .init_schema()
        .build()
        .await
        .unwrap();

    document.cooking_method = Some("BAKE".to_string());
    let second = RecipeUploader::builder()
        .document(document)
        .database(&db_path)
        .sql_dir(queries.path())
        .build()
        .await
        .unwrap();

    match (first, second) {
        (UploadResult::Uploaded(first), UploadResult::Uploaded(second)) => {
            assert_eq!(first.method_id, second.method_id);
            assert_eq!(first.recipe_id, second.recipe_id);
        }
        _ => panic!("Expected Uploaded results"),
    }

    let store = Store::open(&db_path).unwrap();
    assert_eq!(store.count(Table::Method).unwrap(), 1);
    assert_eq!(store.count(Table::Ingredient).unwrap(), 4);
}

#[tokio::test]
async fn test_builder_sql_dir_missing_query() {
    let queries = tempfile::tempdir().unwrap();
    let err = RecipeUploader::builder()
        .recipe_path(fixture("soda-bread.json"))
        .in_memory()
        .sql_dir(queries.path())
        .build()
        .await
        .unwrap_err();

    match err {
        ChompError::SqlTemplateNotFound(path) => {
            assert_eq!(path, queries.path().join("match_contributor.sql"))
        }
        other => panic!("Expected SqlTemplateNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_result_serializes_without_wrapper() {
    let result = RecipeUploader::builder()
        .recipe_path(fixture("soda-bread.json"))
        .build()
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["ingredient_ids"].as_array().unwrap().len(), 4);
    assert_eq!(json["steps_without_annotations"], serde_json::json!([0, 3]));
}

#[tokio::test]
async fn test_builder_without_source() {
    let err = RecipeUploader::builder().in_memory().build().await.unwrap_err();
    assert!(matches!(err, ChompError::BuilderError(_)));
}

#[tokio::test]
async fn test_broken_annotation_aborts_upload() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("chomping.db");

    let err = upload_recipe_file(&fixture("broken-annotation.json"), &db_path)
        .await
        .unwrap_err();
    match &err {
        ChompError::Step { step, .. } => assert_eq!(*step, 1),
        other => panic!("Expected Step error, got {:?}", other),
    }
    let annotation = err.annotation_error().unwrap();
    assert_eq!(annotation.offset(), 4);
    assert_eq!(annotation.text(), "a handful;;blueberries");
    let span = annotation.span().unwrap();
    assert_eq!((span.start, span.end), (4, 27));

    let store = Store::open(&db_path).unwrap();
    assert_eq!(store.count(Table::Recipe).unwrap(), 0);
}

#[tokio::test]
async fn test_missing_recipe_name() {
    let err = RecipeUploader::builder()
        .data_dir(fixture(""))
        .recipe("does-not-exist")
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, ChompError::RecipeNotFound(_)));
}
