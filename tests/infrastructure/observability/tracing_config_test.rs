use solace_gateway::infrastructure::observability::TracingConfig;

#[test]
fn given_default_config_when_log_format_unset_then_plain_text_output() {
    let config = TracingConfig::default();
    assert!(!config.json_format);
}

#[test]
fn given_default_config_when_created_then_environment_is_populated() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
}
