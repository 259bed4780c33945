//! Sans-IO round trips against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every
//! `CardClient` build/parse pair over real HTTP, with ureq standing in for
//! the host that performs the I/O.

use card_core::{ApiError, CardClient, CardPatch, CreditCardFilters, HttpMethod, HttpResponse, SortOrder};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: card_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> std::net::SocketAddr {
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

    addr
}

#[test]
fn list_get_update_lifecycle() {
    let addr = start_server();
    let client = CardClient::new(&format!("http://{addr}/api"));

    // Step 1: list without filters returns the first page.
    let req = client.build_list_cards(&CreditCardFilters::default());
    let page = client.parse_list_cards(execute(req)).unwrap();
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.pagination.total, 12);
    assert_eq!(
        page.pagination.pages,
        page.pagination.total.div_ceil(page.pagination.limit)
    );

    // Step 2: second page sorted by cost ascending.
    let filters = CreditCardFilters {
        sort_by: Some("cost".to_string()),
        sort_order: Some(SortOrder::Asc),
        page: Some(2),
    };
    let req = client.build_list_cards(&filters);
    let page = client.parse_list_cards(execute(req)).unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.page, 2);
    assert!(page.data[0].cost.amount <= page.data[1].cost.amount);

    // Step 3: get one card.
    let req = client.build_get_card(4);
    let card = client.parse_get_card(execute(req)).unwrap();
    assert_eq!(card.id, 4);
    assert_eq!(card.bank.name, "Caja Sur");

    // Step 4: patch its title; the server echoes the full record.
    let patch = CardPatch {
        title: Some("Student Plus".to_string()),
        ..Default::default()
    };
    let req = client.build_update_card(4, &patch).unwrap();
    let echoed = client.parse_update_card(execute(req)).unwrap();
    assert_eq!(echoed.id, Some(4));
    assert_eq!(echoed.title.as_deref(), Some("Student Plus"));
    assert_eq!(echoed.bank.as_ref().map(|b| b.name.as_str()), Some("Caja Sur"));

    // Step 5: merging the echo into the earlier copy matches a fresh read.
    let mut local = card.clone();
    local.apply(&echoed);
    let req = client.build_get_card(4);
    let fetched = client.parse_get_card(execute(req)).unwrap();
    assert_eq!(local, fetched);

    // Step 6: missing card is a plain HTTP error.
    let req = client.build_get_card(999);
    let err = client.parse_get_card(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));

    // Step 7: patching a missing card fails the same way.
    let req = client.build_update_card(999, &patch).unwrap();
    let err = client.parse_update_card(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
}
