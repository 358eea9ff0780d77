//! Grade lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every grade
//! controller operation over real HTTP through a ureq-backed `HttpTransport`.
//! Validates that request building, parameter encoding and response parsing
//! work end-to-end with the actual server.

use std::collections::HashMap;
use std::sync::Arc;

use grades_core::{
    ApiError, ApiModule, Configuration, ConfigurationParameters, Credential, Grade, HttpMethod, HttpRequest,
    HttpResponse, HttpTransport, TransportError,
};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl HttpTransport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = req.url();
        let body = req.body.as_deref().unwrap_or("");
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&url), &req.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&url), &req.headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(&url), &req.headers).send(body.as_bytes()),
            HttpMethod::Put => with_headers(self.agent.put(&url), &req.headers).send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn grade_lifecycle() {
    // Step 1: start mock server on a random port and wire the module.
    let base_path = start_server();
    let module = ApiModule::new();
    module
        .for_root(|| {
            Configuration::new(ConfigurationParameters {
                base_path: Some(base_path.clone()),
                credentials: Some(HashMap::from([(
                    "bearer".to_string(),
                    Credential::provider(|| Some("token".to_string())),
                )])),
                ..Default::default()
            })
        })
        .unwrap();
    let service = module.grade_controller(Some(UreqTransport::new())).unwrap();
    assert_eq!(module.configuration().unwrap().lookup_credential("bearer").as_deref(), Some("token"));

    // Step 2: list: should be empty.
    let grades = service.get_grades().unwrap();
    assert!(grades.is_empty(), "expected empty list");

    // Step 3: blank form.
    assert_eq!(service.get_form(None).unwrap(), "new grade form");

    // Step 4: add a grade.
    let input = Grade {
        student_id: Some("s-1".to_string()),
        course: Some("math & physics".to_string()),
        score: Some(4.5),
        ..Default::default()
    };
    let id = service.add_grade(&input).unwrap();
    assert!(!id.is_empty());

    // Step 5: get the added grade.
    let fetched = service.get_grade(&id).unwrap();
    assert_eq!(fetched.id.as_deref(), Some(id.as_str()));
    assert_eq!(fetched.course.as_deref(), Some("math & physics"));
    assert_eq!(fetched.score, Some(4.5));

    // Step 6: edit form for it, id travels in the query string.
    let form = service.get_form(Some(&id)).unwrap();
    assert_eq!(form, format!("edit grade form for {id}: course=math & physics score=4.5"));

    // Step 7: list: should have one item.
    let grades = service.get_grades().unwrap();
    assert_eq!(grades.len(), 1);

    // Step 8: unknown ids.
    let err = service.get_grade("no such id").unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let err = service.get_form(Some("no+such id")).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let configuration = Arc::new(Configuration::default());
    let client = grades_core::GradeControllerClient::with_base_path(configuration, Some(&format!("http://{addr}")));
    let service = grades_core::GradeControllerService::new(client, UreqTransport::new());
    let err = service.get_grades().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
