// tests/categories_config.rs
use onthisday_explorer::config::categories::{load_keywords_default, load_keywords_from};
use onthisday_explorer::events::{Category, CategoryKeywords};
use std::{env, fs};

#[test]
fn parse_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("categories.toml");
    fs::write(
        &p_toml,
        r#"
[categories]
sports = [" Chess ", "", "chess", "Regatta"]
"#,
    )
    .unwrap();
    let kw = load_keywords_from(&p_toml).unwrap();
    assert_eq!(kw.keywords(Category::Sports), &["chess", "regatta"]);
    assert_eq!(
        kw.keywords(Category::Wars),
        CategoryKeywords::default().keywords(Category::Wars)
    );

    let p_json = dir.path().join("categories.json");
    fs::write(&p_json, r#"{"births": ["born", "Baptised"]}"#).unwrap();
    let kj = load_keywords_from(&p_json).unwrap();
    assert_eq!(kj.keywords(Category::Births), &["born", "baptised"]);
}

#[test]
fn bad_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("categories.json");
    fs::write(&p, r#"{"gossip": ["x"]}"#).unwrap();
    assert!(load_keywords_from(&p).is_err());

    let missing = dir.path().join("nope.toml");
    assert!(load_keywords_from(&missing).is_err());
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not read
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var("CATEGORY_KEYWORDS_PATH");

    // 1) Nothing on disk -> built-in table
    let kw = load_keywords_default().unwrap();
    assert_eq!(kw, CategoryKeywords::default());

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("categories.toml"),
        r#"[categories]
art = ["mural"]"#,
    )
    .unwrap();
    let kt = load_keywords_default().unwrap();
    assert_eq!(kt.keywords(Category::Art), &["mural"]);

    // 3) Env wins over the fallback
    let p_env = tmp.path().join("override.json");
    fs::write(&p_env, r#"{"art": ["fresco"]}"#).unwrap();
    env::set_var("CATEGORY_KEYWORDS_PATH", p_env.display().to_string());
    let ke = load_keywords_default().unwrap();
    assert_eq!(ke.keywords(Category::Art), &["fresco"]);

    // 4) Env pointing nowhere is an error
    env::set_var("CATEGORY_KEYWORDS_PATH", tmp.path().join("gone.toml").display().to_string());
    assert!(load_keywords_default().is_err());
    env::remove_var("CATEGORY_KEYWORDS_PATH");

    env::set_current_dir(&old).unwrap();
}
