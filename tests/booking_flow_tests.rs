use std::{collections::VecDeque, sync::Arc, time::Duration};

use chrono::NaiveDate;
use homeclean::cli::booking_flow::{
    BookingFlow, BookingFlowOutcome, WizardAction, WizardInteraction,
};
use homeclean::cli::core::CommandError;
use homeclean_core::{
    BookingRepository, BookingWizard, CatalogService, ConfirmationProgress,
    ConfirmationSimulator, KeyValueStore, MemoryStore, Sleeper,
};
use homeclean_domain::{default_addresses, default_payment_methods, Route, WizardStep};

/// Replays fixed answers and records the step each one was given on.
struct QueuedAnswers {
    answers: VecDeque<WizardAction>,
    seen_steps: Vec<WizardStep>,
}

impl QueuedAnswers {
    fn new(answers: Vec<WizardAction>) -> Self {
        Self {
            answers: answers.into(),
            seen_steps: Vec::new(),
        }
    }
}

impl WizardInteraction for QueuedAnswers {
    fn next_action(
        &mut self,
        wizard: &BookingWizard,
    ) -> Result<Option<WizardAction>, CommandError> {
        self.seen_steps.push(wizard.step());
        Ok(self.answers.pop_front())
    }
}

#[derive(Default)]
struct CountingSleeper {
    total: Duration,
}

impl Sleeper for CountingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.total += duration;
    }
}

fn regular_wizard() -> BookingWizard {
    let catalog = CatalogService::find("regular")
        .expect("regular catalog")
        .clone();
    BookingWizard::new(catalog, default_addresses(), default_payment_methods())
}

fn april_12() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 12).unwrap()
}

fn full_booking(extra: Vec<WizardAction>) -> Vec<WizardAction> {
    let mut answers = vec![WizardAction::Tier("regular-basic".into())];
    answers.extend(extra);
    answers.extend([
        WizardAction::Next,
        WizardAction::Date(april_12()),
        WizardAction::Time("09:00 AM".into()),
        WizardAction::Next,
        WizardAction::Address("1".into()),
        WizardAction::Next,
        WizardAction::Payment("upi".into()),
        WizardAction::Next,
    ]);
    answers
}

#[test]
fn completed_flow_persists_once_and_routes_home() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repository = BookingRepository::new(store);
    let flow = BookingFlow::new(&repository, ConfirmationSimulator::new(Duration::from_millis(2000)));

    let mut wizard = regular_wizard();
    let mut answers = QueuedAnswers::new(full_booking(vec![
        WizardAction::Toggle("bathroom".into()),
        WizardAction::Frequency(Some("weekly".into())),
    ]));
    let mut sleeper = CountingSleeper::default();
    let mut events = Vec::new();
    let outcome = flow
        .run(&mut wizard, &mut answers, &mut sleeper, &mut |event| events.push(event))
        .expect("flow runs");

    let BookingFlowOutcome::Completed(confirmation) = outcome else {
        panic!("expected a completed booking");
    };
    assert!(confirmation.stored);
    assert_eq!(confirmation.route, Route::Home);
    // (299 + 149) * 0.85 = 380.8
    assert_eq!(confirmation.record.price, 381);
    assert_eq!(confirmation.record.frequency.as_deref(), Some("weekly"));
    assert_eq!(sleeper.total, Duration::from_millis(2000));
    assert_eq!(events.first(), Some(&ConfirmationProgress::Searching));
    assert_eq!(events.last(), Some(&ConfirmationProgress::Found));

    let saved = repository.list().unwrap();
    assert_eq!(saved, vec![confirmation.record]);
    assert_eq!(wizard.step(), WizardStep::Confirmation);
}

#[test]
fn answers_for_other_steps_are_ignored() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repository = BookingRepository::new(store);
    let flow = BookingFlow::new(&repository, ConfirmationSimulator::new(Duration::ZERO));

    let mut wizard = regular_wizard();
    let mut answers = QueuedAnswers::new(full_booking(vec![WizardAction::Payment("card".into())]));
    let outcome = flow
        .run(
            &mut wizard,
            &mut answers,
            &mut CountingSleeper::default(),
            &mut |_| {},
        )
        .unwrap();

    assert!(matches!(outcome, BookingFlowOutcome::Completed(_)));
    assert_eq!(
        wizard.selection().selected_payment_method_id.as_deref(),
        Some("upi")
    );
}

#[test]
fn blocked_next_keeps_the_wizard_on_its_step() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repository = BookingRepository::new(store);
    let flow = BookingFlow::new(&repository, ConfirmationSimulator::new(Duration::ZERO));

    let mut wizard = regular_wizard();
    let mut answers = QueuedAnswers::new(vec![
        WizardAction::Next,
        WizardAction::Tier("regular-premium".into()),
        WizardAction::Next,
        WizardAction::Next,
        WizardAction::Cancel,
    ]);
    let outcome = flow
        .run(
            &mut wizard,
            &mut answers,
            &mut CountingSleeper::default(),
            &mut |_| {},
        )
        .unwrap();

    assert!(matches!(outcome, BookingFlowOutcome::Cancelled(Route::Back)));
    assert_eq!(
        answers.seen_steps,
        vec![
            WizardStep::Service,
            WizardStep::Service,
            WizardStep::Service,
            WizardStep::DateTime,
            WizardStep::DateTime,
        ]
    );
    assert!(repository.list().unwrap().is_empty());
}

#[test]
fn back_from_the_first_step_exits_without_saving() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repository = BookingRepository::new(store);
    let flow = BookingFlow::new(&repository, ConfirmationSimulator::new(Duration::ZERO));

    let mut wizard = regular_wizard();
    let mut answers = QueuedAnswers::new(vec![
        WizardAction::Tier("regular-basic".into()),
        WizardAction::Next,
        WizardAction::Back,
        WizardAction::Back,
    ]);
    let outcome = flow
        .run(
            &mut wizard,
            &mut answers,
            &mut CountingSleeper::default(),
            &mut |_| {},
        )
        .unwrap();

    let BookingFlowOutcome::Cancelled(route) = outcome else {
        panic!("expected the wizard to exit");
    };
    assert_eq!(route, Route::Back);
    assert_eq!(
        wizard.selection().service_id.as_deref(),
        Some("regular-basic")
    );
    assert!(repository.list().unwrap().is_empty());
}

#[test]
fn dates_outside_the_window_are_not_selected() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repository = BookingRepository::new(store);
    let flow = BookingFlow::new(&repository, ConfirmationSimulator::new(Duration::ZERO))
        .within(vec![april_12()]);

    let mut wizard = regular_wizard();
    let mut answers = QueuedAnswers::new(vec![
        WizardAction::Tier("regular-basic".into()),
        WizardAction::Next,
        WizardAction::Date(NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()),
        WizardAction::Cancel,
    ]);
    flow.run(
        &mut wizard,
        &mut answers,
        &mut CountingSleeper::default(),
        &mut |_| {},
    )
    .unwrap();
    assert_eq!(wizard.selection().selected_date, None);

    let mut wizard = regular_wizard();
    let mut answers = QueuedAnswers::new(full_booking(Vec::new()));
    let outcome = flow
        .run(
            &mut wizard,
            &mut answers,
            &mut CountingSleeper::default(),
            &mut |_| {},
        )
        .unwrap();
    assert!(matches!(outcome, BookingFlowOutcome::Completed(_)));
}
