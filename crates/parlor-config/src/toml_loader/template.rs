//! Default TOML config template with documentation comments.

/// Generate the default TOML config content with comments.
pub(super) fn default_config_toml() -> String {
    r##"# Parlor Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# AZURE_OPENAI_KEY, AZURE_OPENAI_ENDPOINT and DEPLOYMENT_NAME in the
# environment take precedence over the [api] values below.

[api]
api_key = "your_default_key"
endpoint = "your_default_endpoint"       # https://<resource>.openai.azure.com
deployment = "your_default_deployment_name"
# api_version = "2023-05-15"

[generation]
# max_output_tokens = 1000   # 1-128000
# system_prompt = "You are a helpful assistant."

[storage]
# transcript_dir = "/path/to/transcripts"   # default: platform data dir
# file_prefix = "chat"
# latest_session_file = "latest_session.md"
"##
    .to_string()
}
