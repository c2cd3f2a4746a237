//! Loads the FolioChain demo site and checks the resulting navigation.

use std::path::{Path, PathBuf};

use folio_config::Config;
use folio_content::{Fallback, FsContent, verify};
use pretty_assertions::assert_eq;

fn demo_config() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/foliochain/folio.toml")
}

#[test]
fn test_demo_config_loads() {
    let config = Config::load(Some(&demo_config()), None).unwrap();

    assert_eq!(config.site.title, "FolioChain Protocol");
    assert_eq!(config.site.base, "/foliochain-docs");
    assert!(config.docs_resolved.content_dir.ends_with("src/content/docs"));
    assert!(config.assets_resolved.missing().is_empty());
}

#[test]
fn test_demo_navigation_links_in_document_order() {
    let config = Config::load(Some(&demo_config()), None).unwrap();
    let nav = config.navigation().unwrap();

    let links: Vec<_> = nav.tree().flatten_links().map(|l| l.as_str()).collect();
    assert_eq!(
        links,
        [
            "/overview/executive-summary/",
            "/overview/introduction/",
            "/overview/objectives/",
            "/architecture/overview/",
            "/architecture/on-chain/",
            "/architecture/off-chain/",
            "/architecture/integration/",
            "/implementation/scalability/",
        ]
    );
}

#[test]
fn test_demo_navigation_is_bilingual() {
    let config = Config::load(Some(&demo_config()), None).unwrap();
    let nav = config.navigation().unwrap();

    let codes: Vec<_> = nav.locales().iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, ["root", "es"]);

    for locale in nav.locales() {
        for root in nav.tree().roots() {
            assert!(!root.resolve_label(&locale.code).is_empty());
        }
    }

    let crumbs = nav.tree().breadcrumbs("/architecture/on-chain/", "es");
    assert_eq!(crumbs, Some(vec!["Arquitectura"]));
}

#[test]
fn test_demo_sidebar_hrefs_include_base_and_locale() {
    let config = Config::load(Some(&demo_config()), None).unwrap();
    let nav = config.navigation().unwrap();

    let sidebar = nav.sidebar("es", Some("/implementation/scalability/"));
    let json = serde_json_value(&sidebar);
    assert_eq!(json["entries"][2]["label"], "Implementación");
    assert_eq!(json["entries"][2]["collapsed"], false);
    assert_eq!(
        json["entries"][2]["entries"][0]["href"],
        "/foliochain-docs/es/implementation/scalability/"
    );
}

#[test]
fn test_cli_base_override() {
    let settings = folio_config::CliSettings {
        base: Some("/".to_owned()),
        ..Default::default()
    };
    let config = Config::load(Some(&demo_config()), Some(&settings)).unwrap();
    let nav = config.navigation().unwrap();
    assert_eq!(nav.base(), "");
}

#[test]
fn test_demo_content_verifies_with_spanish_fallbacks() {
    let config = Config::load(Some(&demo_config()), None).unwrap();
    let nav = config.navigation().unwrap();
    let content = FsContent::new(config.docs_resolved.content_dir.clone());

    let report = verify(&nav, &content).unwrap();

    assert_eq!(report.checked, 8);
    assert_eq!(report.external, 0);
    assert!(report.orphans.is_empty(), "orphans: {:?}", report.orphans);
    let fallback = |link: &str| Fallback {
        locale: "es".to_owned(),
        link: link.to_owned(),
    };
    assert_eq!(
        report.fallbacks,
        [
            fallback("/architecture/on-chain/"),
            fallback("/architecture/off-chain/"),
            fallback("/architecture/integration/"),
            fallback("/implementation/scalability/"),
        ]
    );
}

fn serde_json_value(sidebar: &folio_nav::Sidebar) -> serde_json::Value {
    serde_json::to_value(sidebar).unwrap()
}
