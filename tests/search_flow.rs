mod common;

use bookhunt::domain::{Genre, Language};
use bookhunt::ui::StatusKind;
use bookhunt::Event;
use common::{search_body, Host};

#[test]
fn pages_accumulate_in_request_order() {
    let mut host = Host::granted();
    host.commit_text("dune");

    let request = host.pending.last().unwrap().url.clone();
    assert!(request.contains("q=dune"), "{request}");
    assert!(request.contains("language=eng"), "{request}");
    assert!(request.contains("page=1"), "{request}");

    assert!(host.respond_to("q=dune", 200, &search_body("dune", 20, 45)));
    assert_eq!(host.titles().len(), 20);

    host.send(Event::AdvancePage);
    assert!(host.pending.last().unwrap().url.contains("page=2"));
    host.respond_to("page=2", 200, &search_body("more", 20, 45));

    let titles = host.titles();
    assert_eq!(titles.len(), 40);
    assert!(host.state.results.has_more());
    assert_eq!(titles[0], "dune 0");
    assert_eq!(titles[20], "more 0");
    assert_eq!(host.state.query.page(), 2);
}

#[test]
fn empty_page_ends_pagination() {
    let mut host = Host::granted();
    host.respond(0, 200, &search_body("popular", 20, 20));

    host.send(Event::AdvancePage);
    host.respond_to("page=2", 200, &search_body("none", 0, 20));
    assert!(!host.state.results.has_more());

    assert!(!host.send(Event::AdvancePage));
    assert!(host.pending.is_empty());

    let vm = host.state.compute_viewmodel(30, 120);
    let status = vm.status.unwrap();
    assert_eq!(status.kind, StatusKind::Info);
    assert!(status.message.contains("end of results"), "{}", status.message);
}

#[test]
fn page_of_keyless_documents_keeps_pagination_open() {
    let mut host = Host::granted();
    host.respond(0, 200, &search_body("popular", 20, 900));

    host.send(Event::AdvancePage);
    host.respond_to("page=2", 200, r#"{"numFound":900,"docs":[{"title":"no key"}]}"#);
    assert_eq!(host.titles().len(), 20);
    assert!(host.state.results.has_more());

    host.send(Event::AdvancePage);
    assert!(host.pending[0].url.contains("page=3"));
}

#[test]
fn late_answer_for_abandoned_query_is_discarded() {
    let mut host = Host::granted();
    host.commit_text("dune");
    host.commit_text("hobbit");

    assert!(host.respond_to("q=hobbit", 200, &search_body("hobbit", 3, 3)));
    assert!(!host.respond_to("q=dune", 200, &search_body("dune", 20, 45)));
    assert!(!host.respond_to("q=popular", 200, &search_body("popular", 20, 900)));

    assert_eq!(host.titles(), vec!["hobbit 0", "hobbit 1", "hobbit 2"]);
}

#[test]
fn only_the_settled_text_is_searched() {
    let mut host = Host::granted();
    host.send(Event::SearchMode);
    for c in "dune".chars() {
        host.send(Event::Char(c));
    }
    assert_eq!(host.timers.len(), 4);
    assert_eq!(host.pending.len(), 1);

    while !host.timers.is_empty() {
        host.fire_timer();
    }

    assert_eq!(host.pending.len(), 2);
    assert!(host.pending[1].url.contains("q=dune"));
    assert_eq!(host.state.query.query().text, "dune");
}

#[test]
fn failed_page_can_be_retried() {
    let mut host = Host::granted();
    host.respond(0, 503, "Service Unavailable");

    assert_eq!(host.state.results.failed_page(), Some(1));
    let status = host.state.compute_viewmodel(30, 120).status.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.message.contains("503"), "{}", status.message);

    assert!(host.send(Event::Retry));
    host.respond_to("page=1", 200, &search_body("popular", 20, 900));
    assert_eq!(host.state.results.failed_page(), None);
    assert_eq!(host.titles().len(), 20);
}

#[test]
fn transport_failure_keeps_existing_results() {
    let mut host = Host::granted();
    host.respond(0, 200, &search_body("popular", 20, 900));

    host.send(Event::AdvancePage);
    host.respond_to("page=2", 0, "connection refused");

    assert_eq!(host.titles().len(), 20);
    assert_eq!(host.state.results.failed_page(), Some(2));

    host.send(Event::AdvancePage);
    assert!(host.pending[0].url.contains("page=2"));
}

#[test]
fn filter_changes_start_a_new_epoch() {
    let mut host = Host::granted();
    host.respond(0, 200, &search_body("popular", 20, 900));

    host.send(Event::SetGenre(Genre::Fantasy));
    host.send(Event::SetLanguage(Language::from_code("ger").unwrap()));

    assert!(host.titles().is_empty());
    assert_eq!(host.state.query.page(), 1);

    // the genre request was superseded by the language change
    assert!(!host.respond_to("language=eng", 200, &search_body("stale", 20, 20)));
    host.respond_to("language=ger", 200, &search_body("drachen", 4, 4));
    assert_eq!(host.titles().len(), 4);
    assert!(host.state.compute_viewmodel(30, 120).header.filters.contains("German"));
}

#[test]
fn fetches_wait_for_web_access() {
    let mut host = Host::new(Box::new(bookhunt::storage::MemoryStorage::new()));
    host.commit_text("dune");
    assert!(host.pending.is_empty());

    host.send(Event::PermissionsResult { granted: true });
    assert_eq!(host.pending.len(), 1);
    assert!(host.pending[0].url.contains("q=dune"));
}
