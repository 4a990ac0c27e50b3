#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.run.mod_key, "dephosphorylation");
        assert_eq!(config.run.regulation_types, vec!["activity"]);
        assert_eq!(config.export.curation_source.as_deref(), Some("signor_dephos"));
        assert!(config.curations.cache_path.ends_with("ptmcur/curations.json"));
        assert!(config.comments.corrections.is_empty());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::from_toml(
            r#"
            [run]
            mod_key = "ubiquitination"
            regulation_types = ["activity", "amount"]

            [curations]
            base_url = "http://localhost:8000"
            api_key = "secret"

            [export]
            output = "out/ubi.csv"

            [comments.corrections]
            "EFFECT: up-regulates" = "EFFECT:up-regulates"
            "#,
        )
        .unwrap();

        let scope = config.scope().unwrap();
        assert_eq!(scope.mod_type, ModType::Ubiquitination);
        assert_eq!(scope.regulation_types.len(), 2);
        assert_eq!(config.curations.resolved_api_key().as_deref(), Some("secret"));
        assert_eq!(config.curations.timeout_secs, 120);
        assert_eq!(config.export_path(&scope), PathBuf::from("out/ubi.csv"));
        assert_eq!(config.comments.corrections.len(), 1);
    }

    #[test]
    fn test_derived_file_names() {
        let config = Config::default();
        let scope = config.scope().unwrap();
        assert_eq!(config.export_path(&scope), PathBuf::from("dephosphorylations_with_reg_export.csv"));
        assert_eq!(
            config.snapshot_path(&scope),
            PathBuf::from("./dephosphorylations_with_reg_sorted.json")
        );
    }

    #[test]
    fn test_unknown_types_are_rejected() {
        let config = Config::from_toml("[run]\nmod_key = \"glowing\"\n").unwrap();
        assert!(config.mod_type().is_err());

        let config = Config::from_toml("[run]\nregulation_types = [\"binding\"]\n").unwrap();
        assert!(config.regulation_families().is_err());
    }

    #[test]
    fn test_gene_list_paths() {
        let lists = GeneListConfig::default();
        assert_eq!(lists.path_for("kinases"), Some(Path::new("kinases.txt")));
        assert_eq!(lists.path_for("e3_ligases"), Some(Path::new("e3_ubi_ligases.txt")));
        assert_eq!(lists.path_for("lipases"), None);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());

        let path = dir.path().join("ptmcur.toml");
        std::fs::write(&path, "[run]\nmod_key = \"phosphorylation\"\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().run.mod_key, "phosphorylation");
    }
}
