use log::{debug, info};
use reqwest::Client;

use crate::error::{Error, Result};

pub const SET_HOSTS_COMMAND: &str = "namecheap.domains.dns.setHosts";

/// Authenticated access to the Namecheap XML API.
///
/// Namecheap authenticates with the API user, key and an allow-listed client
/// IP. All three go into every query string.
pub struct NamecheapClient {
    client: Client,
    api_url: String,
    username: String,
    api_key: String,
    client_ip: String,
}

/// The parts of an XML response this tool cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: Option<String>,
    pub error: Option<String>,
    pub raw: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("OK") && self.error.is_none()
    }
}

impl NamecheapClient {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
        client_ip: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            username: username.into(),
            api_key: api_key.into(),
            client_ip: client_ip.into(),
        }
    }

    fn auth_params(&self) -> Vec<(String, String)> {
        vec![
            ("ApiUser".to_string(), self.username.clone()),
            ("ApiKey".to_string(), self.api_key.clone()),
            ("UserName".to_string(), self.username.clone()),
            ("ClientIp".to_string(), self.client_ip.clone()),
        ]
    }

    /// Builds the full query for `command`. Caller parameters come last.
    pub fn query_params(&self, command: &str, params: &[(String, String)]) -> Vec<(String, String)> {
        let mut query = self.auth_params();
        query.push(("Command".to_string(), command.to_string()));
        query.extend(params.iter().cloned());
        query
    }

    /// Issues `command` and parses the reply. The HTTP status is not checked:
    /// Namecheap reports failures inside the XML body.
    ///
    /// Transport errors are stripped of their URL, the query carries the API key.
    pub async fn call(&self, command: &str, params: &[(String, String)]) -> Result<ApiResponse> {
        let query = self.query_params(command, params);
        info!("Calling {} with {} parameter(s)", command, params.len());

        let response = self
            .client
            .get(&self.api_url)
            .query(&query)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        debug!("Registrar replied with HTTP {}", response.status());

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        parse_response(&body)
    }
}

pub fn parse_response(body: &str) -> Result<ApiResponse> {
    let doc = roxmltree::Document::parse(body).map_err(|source| Error::Parse {
        source,
        raw: body.to_string(),
    })?;

    let status = doc.root_element().attribute("Status").map(str::to_string);

    // Local name only, responses carry a default namespace.
    let error = doc
        .descendants()
        .find(|node| node.has_tag_name("Error"))
        .and_then(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    debug!("Parsed registrar status {:?}", status);

    Ok(ApiResponse {
        status,
        error,
        raw: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OK_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <RequestedCommand>namecheap.domains.dns.sethosts</RequestedCommand>
  <CommandResponse Type="namecheap.domains.dns.setHosts">
    <DomainDNSSetHostsResult Domain="social-ai.pro" IsSuccess="true" />
  </CommandResponse>
</ApiResponse>"#;

    const ERROR_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="1011150">Invalid request IP: 203.0.113.7</Error>
  </Errors>
</ApiResponse>"#;

    fn client_for(server: &MockServer) -> NamecheapClient {
        NamecheapClient::new(
            Client::new(),
            format!("{}/xml.response", server.uri()),
            "alice",
            "k3y",
            "203.0.113.7",
        )
    }

    #[test]
    fn parses_ok_status() {
        let response = parse_response(OK_BODY).unwrap();
        assert_eq!(response.status.as_deref(), Some("OK"));
        assert_eq!(response.error, None);
        assert!(response.is_ok());
        assert_eq!(response.raw, OK_BODY);
    }

    #[test]
    fn finds_namespaced_error_element() {
        let response = parse_response(ERROR_BODY).unwrap();
        assert_eq!(response.status.as_deref(), Some("ERROR"));
        assert_eq!(response.error.as_deref(), Some("Invalid request IP: 203.0.113.7"));
        assert!(!response.is_ok());
    }

    #[test]
    fn error_element_overrides_ok_status() {
        let body = r#"<ApiResponse Status="OK"><Errors><Error>Invalid request</Error></Errors></ApiResponse>"#;
        let response = parse_response(body).unwrap();
        assert!(!response.is_ok());
    }

    #[test]
    fn missing_status_is_not_ok() {
        let response = parse_response("<ApiResponse />").unwrap();
        assert_eq!(response.status, None);
        assert!(!response.is_ok());
    }

    #[test]
    fn empty_error_element_is_ignored() {
        let response = parse_response(r#"<ApiResponse Status="ERROR"><Error>  </Error></ApiResponse>"#).unwrap();
        assert_eq!(response.error, None);
    }

    #[test]
    fn non_xml_body_is_a_parse_error() {
        let err = parse_response("<html><body>Bad Gateway").unwrap_err();
        match err {
            Error::Parse { raw, .. } => assert_eq!(raw, "<html><body>Bad Gateway"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn auth_params_precede_command_and_caller_params() {
        let client = NamecheapClient::new(Client::new(), "http://unused", "alice", "k3y", "203.0.113.7");
        let query = client.query_params("some.command", &[("SLD".to_string(), "social-ai".to_string())]);

        let keys: Vec<&str> = query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["ApiUser", "ApiKey", "UserName", "ClientIp", "Command", "SLD"]);
        assert_eq!(query[0].1, "alice");
        assert_eq!(query[2].1, "alice");
        assert_eq!(query[4].1, "some.command");
    }

    #[test]
    fn calls_do_not_share_parameters() {
        let client = NamecheapClient::new(Client::new(), "http://unused", "alice", "k3y", "203.0.113.7");
        let first = client.query_params("a", &[("Extra".to_string(), "1".to_string())]);
        let second = client.query_params("b", &[]);

        assert_eq!(first.len(), 6);
        assert_eq!(second.len(), 5);
        assert!(second.iter().all(|(k, _)| k != "Extra"));
    }

    #[tokio::test]
    async fn call_sends_authentication_and_command() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/xml.response"))
            .and(query_param("ApiUser", "alice"))
            .and(query_param("ApiKey", "k3y"))
            .and(query_param("UserName", "alice"))
            .and(query_param("ClientIp", "203.0.113.7"))
            .and(query_param("Command", SET_HOSTS_COMMAND))
            .respond_with(ResponseTemplate::new(200).set_body_string(OK_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).call(SET_HOSTS_COMMAND, &[]).await.unwrap();
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn call_parses_body_of_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string(ERROR_BODY))
            .mount(&server)
            .await;

        let response = client_for(&server).call(SET_HOSTS_COMMAND, &[]).await.unwrap();
        assert_eq!(response.error.as_deref(), Some("Invalid request IP: 203.0.113.7"));
    }

    #[tokio::test]
    async fn call_reports_unreachable_registrar() {
        let client = NamecheapClient::new(Client::new(), "http://127.0.0.1:1/xml.response", "alice", "k3y", "203.0.113.7");
        let err = client.call(SET_HOSTS_COMMAND, &[]).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn transport_error_does_not_reveal_api_key() {
        let client = NamecheapClient::new(
            Client::new(),
            "http://127.0.0.1:1/xml.response",
            "alice",
            "SUPERSECRETKEY",
            "203.0.113.7",
        );
        let err = client.call(SET_HOSTS_COMMAND, &[]).await.unwrap_err();

        let debug = format!("{:?}", err);
        let chain = format!("{:?}", anyhow::Error::new(err).context("Failed to update DNS records"));
        assert!(!debug.contains("SUPERSECRETKEY"), "{}", debug);
        assert!(!chain.contains("SUPERSECRETKEY"), "{}", chain);
    }
}
