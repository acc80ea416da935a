//! Language model trait contract and client configuration.

use chatdocs_model::{GroqClient, LanguageModel, MockLlm, ModelError};

#[tokio::test]
async fn mock_llm_returns_canned_response_and_records_prompts() {
    let llm = MockLlm::new("a canned answer");

    let first = llm.generate("first prompt").await.unwrap();
    let second = llm.generate("second prompt").await.unwrap();

    assert_eq!(first, "a canned answer");
    assert_eq!(second, "a canned answer");
    assert_eq!(llm.prompts(), vec!["first prompt".to_string(), "second prompt".to_string()]);
    assert_eq!(llm.name(), "mock");
}

#[test]
fn groq_client_rejects_an_empty_api_key() {
    let err = GroqClient::new("").unwrap_err();
    assert!(matches!(err, ModelError::ConfigError(_)));
}

#[test]
fn groq_client_reports_the_configured_model_name() {
    let client = GroqClient::new("gsk_test").unwrap();
    assert_eq!(client.name(), "llama-3.3-70b-versatile");

    let client = client.with_model("llama-3.1-8b-instant");
    assert_eq!(client.name(), "llama-3.1-8b-instant");
}
