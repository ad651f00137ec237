//! Integration tests for the inbox service.
//!
//! These use an in-memory gateway that scripts responses and counts
//! calls, so no network is involved.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use brosmail_core::service::{InboxNotice, InboxService, MailGateway, RefreshOutcome, SubmitOutcome};
use brosmail_core::{Domain, MemoryStore, MockClock, PAGE_SIZE, PollerState};
use brosmail_api::{BatchOutcome, CreateStatus, InboxPage, Message};

/// Scripted gateway with call counters.
#[derive(Default)]
struct FakeGateway {
    create_status: Mutex<Option<CreateStatus>>,
    pages: Mutex<Vec<InboxPage>>,
    create_args: Mutex<Vec<String>>,
    create_calls: AtomicU32,
    fetch_calls: AtomicU32,
}

impl FakeGateway {
    fn with_create(status: CreateStatus) -> Self {
        Self {
            create_status: Mutex::new(Some(status)),
            ..Self::default()
        }
    }

    fn push_page(&self, page: InboxPage) {
        self.pages.lock().unwrap().insert(0, page);
    }

    fn fetch_calls(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl MailGateway for &FakeGateway {
    async fn check_or_create(&self, email: &str) -> CreateStatus {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.create_args.lock().unwrap().push(email.to_string());
        self.create_status
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(CreateStatus::Exists)
    }

    async fn fetch_page(&self, _user: &str, page: u32, limit: u32) -> InboxPage {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| InboxPage::fallback(page, limit))
    }

    async fn create_batch(
        &self,
        _quantity: u32,
        _domain: &str,
    ) -> brosmail_api::Result<BatchOutcome> {
        Ok(BatchOutcome::default())
    }
}

fn message(subject: &str, is_read: bool) -> Message {
    Message {
        from_name: "Acme".to_string(),
        from_email: "no-reply@acme.test".to_string(),
        subject: subject.to_string(),
        body: String::new(),
        date: String::new(),
        is_read,
    }
}

fn service(
    gateway: &FakeGateway,
) -> (
    InboxService<&FakeGateway, MemoryStore, MockClock>,
    Arc<MockClock>,
) {
    let clock = Arc::new(MockClock::new());
    let service = InboxService::new(gateway, Arc::new(MemoryStore::new()), Arc::clone(&clock));
    (service, clock)
}

async fn load(service: &mut InboxService<&FakeGateway, MemoryStore, MockClock>) {
    service.set_local_part("alice");
    let outcome = service.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Loaded { .. }));
}

#[tokio::test]
async fn submit_creates_loads_and_records_history() {
    let gateway = FakeGateway::with_create(CreateStatus::Created);
    gateway.push_page(InboxPage {
        emails: vec![message("hello", false), message("read", true)],
        page: 1,
        limit: PAGE_SIZE,
    });
    let (mut service, _clock) = service(&gateway);
    service.set_local_part("alice");

    let outcome = service.submit().await;
    assert_eq!(outcome, SubmitOutcome::Loaded { created: true });
    assert_eq!(
        outcome.message().as_deref(),
        Some("Email created successfully. Loaded inbox!")
    );
    assert_eq!(service.messages().len(), 2);
    assert_eq!(service.unread_count(), 1);
    assert_eq!(service.page(), 1);
    assert!(service.has_loaded());
    assert_eq!(service.recent_inputs(), vec!["alice"]);
    assert_eq!(service.address(), "alice@nguyenmail.pro");
    // The create payload carries the bare local-part, never the domain.
    assert_eq!(*gateway.create_args.lock().unwrap(), vec!["alice"]);
}

#[tokio::test]
async fn submit_with_empty_input_sends_nothing() {
    let gateway = FakeGateway::default();
    let (mut service, _clock) = service(&gateway);
    assert_eq!(service.submit().await, SubmitOutcome::EmptyInput);
    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn creation_failure_leaves_inbox_untouched() {
    let gateway = FakeGateway::with_create(CreateStatus::Error {
        detail: Some("mailbox quota".to_string()),
    });
    let (mut service, _clock) = service(&gateway);
    service.set_local_part("alice");
    let outcome = service.submit().await;
    assert_eq!(
        outcome.message().as_deref(),
        Some("Error while creating/checking email! mailbox quota")
    );
    assert!(!service.has_loaded());
    assert_eq!(gateway.fetch_calls(), 0);
    assert!(service.recent_inputs().is_empty());
}

#[tokio::test]
async fn fallback_page_clears_displayed_inbox() {
    let gateway = FakeGateway::with_create(CreateStatus::Exists);
    gateway.push_page(InboxPage {
        emails: vec![message("hello", false)],
        page: 1,
        limit: PAGE_SIZE,
    });
    let (mut service, _clock) = service(&gateway);
    load(&mut service).await;
    assert_eq!(service.messages().len(), 1);

    // Next fetch degrades to the fallback (e.g. emails was not an array).
    assert_eq!(service.refresh().await, RefreshOutcome::Done);
    assert!(service.messages().is_empty());
}

#[tokio::test]
async fn refresh_before_first_load_is_inert() {
    let gateway = FakeGateway::default();
    let (mut service, _clock) = service(&gateway);
    assert_eq!(service.refresh().await, RefreshOutcome::NotLoaded);
    assert_eq!(service.change_page(2).await, RefreshOutcome::NotLoaded);
    assert!(!service.enable_auto_refresh());
    assert_eq!(gateway.fetch_calls(), 0);
}

#[tokio::test]
async fn change_page_applies_requested_page() {
    let gateway = FakeGateway::with_create(CreateStatus::Exists);
    let (mut service, _clock) = service(&gateway);
    load(&mut service).await;
    gateway.push_page(InboxPage {
        emails: vec![message("page two", false)],
        page: 2,
        limit: PAGE_SIZE,
    });
    assert_eq!(service.change_page(2).await, RefreshOutcome::Done);
    assert_eq!(service.page(), 2);
    assert_eq!(service.messages()[0].subject, "page two");
}

#[tokio::test]
async fn poller_ticks_drive_exactly_one_fetch() {
    let gateway = FakeGateway::with_create(CreateStatus::Exists);
    let (mut service, clock) = service(&gateway);
    load(&mut service).await;
    let after_load = gateway.fetch_calls();

    assert!(service.enable_auto_refresh());
    for _ in 0..10 {
        clock.advance(std::time::Duration::from_secs(1));
        assert_eq!(service.tick().await, None);
    }
    assert_eq!(gateway.fetch_calls(), after_load + 1);
    assert_eq!(service.poller().countdown(), 10);
}

#[tokio::test]
async fn poller_stops_at_the_ceiling() {
    let gateway = FakeGateway::with_create(CreateStatus::Exists);
    let (mut service, clock) = service(&gateway);
    load(&mut service).await;
    assert!(service.enable_auto_refresh());

    clock.advance(std::time::Duration::from_secs(61));
    assert_eq!(service.tick().await, Some(InboxNotice::AutoRefreshStopped));
    assert_eq!(service.poller().state(), PollerState::Disabled);
}

#[tokio::test]
async fn editing_the_target_disables_the_poller() {
    let gateway = FakeGateway::with_create(CreateStatus::Exists);
    let (mut service, _clock) = service(&gateway);
    load(&mut service).await;
    assert!(service.enable_auto_refresh());

    service.set_local_part("bob");
    assert_eq!(service.poller().state(), PollerState::Disabled);

    assert!(service.enable_auto_refresh());
    service.set_domain(Domain::CuvoxDe);
    assert_eq!(service.poller().state(), PollerState::Disabled);
}

#[tokio::test]
async fn generate_produces_a_fresh_local_part() {
    let gateway = FakeGateway::default();
    let (mut service, _clock) = service(&gateway);
    service.generate();
    let generated = service.local_part().to_string();
    assert!((8..=11).contains(&generated.len()));
    assert!(generated.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn disable_notice_has_user_facing_text() {
    let gateway = FakeGateway::with_create(CreateStatus::Exists);
    let (mut service, _clock) = service(&gateway);
    load(&mut service).await;
    service.enable_auto_refresh();
    let notice = service.disable_auto_refresh();
    assert_eq!(notice.message(), "Auto-refresh disabled.");
    assert_eq!(service.poller().state(), PollerState::Disabled);
}
