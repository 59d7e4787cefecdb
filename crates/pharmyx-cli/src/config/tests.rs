#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = Config::default();
        assert_eq!(config.pubmed.max_results, 200);
        assert_eq!(config.pubmed.tool, "pharmyx");
        assert_eq!(config.classification.match_mode, MatchMode::Substring);
        assert!(config.pubmed_config().api_key.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.pubmed.contact_email, default_contact_email());
        assert_eq!(config.pubmed.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = Config::from_toml_str(
            r#"
            [pubmed]
            contact_email = "curator@lab.org"
            max_results = 50

            [classification]
            match_mode = "word"
            "#,
        )
        .unwrap();
        assert_eq!(config.pubmed.contact_email, "curator@lab.org");
        assert_eq!(config.pubmed.max_results, 50);
        assert_eq!(config.pubmed.tool, "pharmyx");
        assert_eq!(config.classification.match_mode, MatchMode::Word);
    }

    #[test]
    fn test_unknown_match_mode_rejected() {
        let err = Config::from_toml_str("[classification]\nmatch_mode = \"fuzzy\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| match key {
            "PHARMYX_CONTACT_EMAIL" => Some("env@lab.org".to_string()),
            "PHARMYX_NCBI_API_KEY" => Some("k3y".to_string()),
            _ => None,
        });
        let pubmed = config.pubmed_config();
        assert_eq!(pubmed.contact_email, "env@lab.org");
        assert_eq!(pubmed.api_key.as_deref(), Some("k3y"));
    }

    #[test]
    fn test_file_api_key_wins_over_env() {
        let mut config = Config::from_toml_str("[pubmed]\napi_key = \"from-file\"\n").unwrap();
        config.apply_env_overrides(|_| Some("from-env".to_string()));
        assert_eq!(config.pubmed.api_key, "from-file");
        assert_eq!(config.pubmed.contact_email, "from-env");
    }
}
