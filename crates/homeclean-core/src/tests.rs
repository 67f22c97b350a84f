use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use homeclean_domain::{
    default_addresses, default_payment_methods, BookingRecord, Route, UnknownCategoryPolicy,
    WizardStep,
};

use crate::{
    complete_booking, AddressBook, BookingRepository, BookingWizard, CatalogService,
    ConfirmationProgress, ConfirmationSimulator, CoreError, KeyValueStore, MemoryStore,
    RetreatOutcome, Sleeper, StepOutcome, StorageNotice, ToggleOutcome, ValidationError,
    BOOKINGS_KEY,
};

#[derive(Default)]
struct RecordingSleeper {
    total: Duration,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.total += duration;
    }
}

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Err(CoreError::Storage("quota exceeded".into()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("quota exceeded".into()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("quota exceeded".into()))
    }
}

fn wizard_for(key: &str) -> BookingWizard {
    let catalog =
        CatalogService::resolve(key, UnknownCategoryPolicy::Fallback).expect("catalog resolves");
    BookingWizard::new(catalog, default_addresses(), default_payment_methods())
}

fn april_12() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 12).unwrap()
}

/// Walks the regular wizard to the payment step with the reference inputs.
fn regular_at_payment() -> BookingWizard {
    let mut wizard = wizard_for("regular");
    wizard.select_service("regular-basic").expect("tier");
    assert_eq!(wizard.advance(), Ok(StepOutcome::Moved(WizardStep::DateTime)));
    wizard.select_date(april_12());
    wizard.select_time("09:00 AM").expect("slot");
    assert_eq!(wizard.advance(), Ok(StepOutcome::Moved(WizardStep::Address)));
    wizard.select_address("1").expect("address");
    assert_eq!(wizard.advance(), Ok(StepOutcome::Moved(WizardStep::Payment)));
    wizard
}

#[test]
fn advance_without_service_fails_and_stays_put() {
    let mut wizard = wizard_for("regular");
    let err = wizard.advance().expect_err("service required");
    assert_eq!(err, ValidationError::SelectService);
    assert_eq!(err.code(), "select-service");
    assert_eq!(wizard.step(), WizardStep::Service);
}

#[test]
fn datetime_checks_date_before_time() {
    let mut wizard = wizard_for("kitchen");
    wizard.select_service("kitchen-compact").unwrap();
    wizard.advance().unwrap();

    assert_eq!(wizard.advance(), Err(ValidationError::SelectDate));
    wizard.select_date(april_12());
    let err = wizard.advance().expect_err("time still missing");
    assert_eq!(err.code(), "select-time");
    assert_eq!(wizard.step(), WizardStep::DateTime);
}

#[test]
fn address_and_payment_are_required() {
    let mut wizard = wizard_for("regular");
    wizard.select_service("regular-basic").unwrap();
    wizard.advance().unwrap();
    wizard.select_date(april_12());
    wizard.select_time("09:00 AM").unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.advance(), Err(ValidationError::SelectAddress));
    wizard.select_address("2").unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.advance(), Err(ValidationError::SelectPayment));
    assert_eq!(wizard.step(), WizardStep::Payment);
}

#[test]
fn toggling_included_option_is_a_no_op() {
    let mut wizard = wizard_for("deep");
    wizard.select_service("deep-2bhk").unwrap();
    let before = wizard.selection().clone();

    assert_eq!(wizard.toggle_option("floors").unwrap(), ToggleOutcome::Locked);
    assert_eq!(wizard.selection(), &before);
    assert_eq!(wizard.total_price(), 2799);
}

#[test]
fn paired_toggles_restore_price_and_selection() {
    for catalog in CatalogService::categories() {
        let mut wizard = wizard_for(&catalog.key);
        wizard.select_service(&catalog.tiers[0].id).unwrap();
        for option in catalog.options.iter().filter(|option| !option.included) {
            let before = wizard.selection().clone();
            assert_eq!(wizard.toggle_option(&option.id).unwrap(), ToggleOutcome::Added);
            assert_eq!(wizard.total_price(), before.total_price + option.price);
            assert_eq!(wizard.toggle_option(&option.id).unwrap(), ToggleOutcome::Removed);
            assert_eq!(wizard.selection(), &before);
        }
    }
}

#[test]
fn unknown_ids_leave_selection_untouched() {
    let mut wizard = wizard_for("regular");
    let before = wizard.selection().clone();
    assert!(matches!(
        wizard.select_service("regular-mansion"),
        Err(CoreError::ServiceNotFound(_))
    ));
    assert!(matches!(
        wizard.toggle_option("laundry"),
        Err(CoreError::OptionNotFound(_))
    ));
    assert!(matches!(
        wizard.select_frequency(Some("daily")),
        Err(CoreError::FrequencyNotFound(_))
    ));
    assert!(matches!(
        wizard.select_time("10:30 AM"),
        Err(CoreError::TimeSlotNotFound(_))
    ));
    assert!(matches!(
        wizard.select_address("99"),
        Err(CoreError::AddressNotFound(_))
    ));
    assert_eq!(wizard.selection(), &before);
}

#[test]
fn price_tracks_tier_frequency_and_addons() {
    let mut wizard = wizard_for("regular");
    assert_eq!(wizard.total_price(), 0);
    wizard.select_service("regular-basic").unwrap();
    assert_eq!(wizard.total_price(), 299);
    wizard.toggle_option("utensils").unwrap();
    assert_eq!(wizard.total_price(), 378);
    wizard.select_frequency(Some("weekly")).unwrap();
    assert_eq!(wizard.total_price(), 321); // 378 * 0.85 = 321.3
    wizard.select_service("regular-standard").unwrap();
    assert_eq!(wizard.total_price(), 449); // (449 + 79) * 0.85 = 448.8
    wizard.select_frequency(None).unwrap();
    assert_eq!(wizard.total_price(), 528);
}

#[test]
fn completing_the_reference_booking_persists_one_record_and_goes_home() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repository = BookingRepository::new(store.clone());
    let mut wizard = regular_at_payment();
    wizard.select_payment_method("upi").unwrap();

    let record = match wizard.advance() {
        Ok(StepOutcome::Confirmed(record)) => record,
        other => panic!("expected confirmation, got {other:?}"),
    };
    assert_eq!(wizard.step(), WizardStep::Confirmation);

    let mut sleeper = RecordingSleeper::default();
    let mut events = Vec::new();
    let confirmation = complete_booking(
        &repository,
        record,
        &ConfirmationSimulator::default(),
        &mut sleeper,
        &mut |event| events.push(event),
    );

    assert_eq!(confirmation.route, Route::Home);
    assert!(confirmation.stored);
    assert!(confirmation.notices.is_empty());
    assert_eq!(sleeper.total, Duration::from_millis(2000));
    assert_eq!(events.last(), Some(&ConfirmationProgress::Found));

    let stored = repository.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored[0],
        BookingRecord {
            service_type: "Regular Cleaning (1 BHK)".into(),
            options: vec!["sweeping".into(), "mopping".into(), "dusting".into()],
            frequency: None,
            date: april_12(),
            time: "09:00 AM".into(),
            price: 299,
            address: "Home - 12 MG Road, Indiranagar, Bengaluru".into(),
        }
    );
}

#[test]
fn retreat_and_readvance_keeps_payment_choice() {
    let mut wizard = regular_at_payment();
    wizard.select_payment_method("card").unwrap();

    assert_eq!(wizard.retreat(), RetreatOutcome::Moved(WizardStep::Address));
    assert_eq!(wizard.advance(), Ok(StepOutcome::Moved(WizardStep::Payment)));
    assert_eq!(
        wizard.selection().selected_payment_method_id.as_deref(),
        Some("card")
    );
}

#[test]
fn back_navigation_retains_earlier_selections() {
    let mut wizard = regular_at_payment();
    assert_eq!(wizard.retreat(), RetreatOutcome::Moved(WizardStep::Address));
    assert_eq!(wizard.retreat(), RetreatOutcome::Moved(WizardStep::DateTime));
    assert_eq!(wizard.retreat(), RetreatOutcome::Moved(WizardStep::Service));
    assert_eq!(wizard.retreat(), RetreatOutcome::Exited(Route::Back));
    assert_eq!(wizard.step(), WizardStep::Service);

    let selection = wizard.selection();
    assert_eq!(selection.service_id.as_deref(), Some("regular-basic"));
    assert_eq!(selection.selected_date, Some(april_12()));
    assert_eq!(selection.selected_time.as_deref(), Some("09:00 AM"));
    assert_eq!(selection.selected_address_id.as_deref(), Some("1"));
    // Forward again without re-entering anything.
    assert!(wizard.advance().is_ok());
    assert!(wizard.advance().is_ok());
    assert!(wizard.advance().is_ok());
    assert_eq!(wizard.step(), WizardStep::Payment);
}

#[test]
fn confirmation_is_terminal_and_cannot_be_backed_out_of() {
    let mut wizard = regular_at_payment();
    wizard.select_payment_method("cash").unwrap();
    assert!(matches!(wizard.advance(), Ok(StepOutcome::Confirmed(_))));
    assert_eq!(wizard.advance(), Ok(StepOutcome::Terminal));
    assert_eq!(wizard.retreat(), RetreatOutcome::Locked);
    assert_eq!(wizard.step(), WizardStep::Confirmation);
}

#[test]
fn corrupt_collection_is_replaced_by_the_new_record() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.set_item(BOOKINGS_KEY, "{not json").unwrap();
    let repository = BookingRepository::new(store.clone());
    let mut wizard = regular_at_payment();
    wizard.select_payment_method("upi").unwrap();
    let Ok(StepOutcome::Confirmed(record)) = wizard.advance() else {
        panic!("booking should confirm");
    };

    let confirmation = complete_booking(
        &repository,
        record.clone(),
        &ConfirmationSimulator::new(Duration::ZERO),
        &mut RecordingSleeper::default(),
        &mut |_| {},
    );

    assert!(confirmation.stored);
    assert!(matches!(
        confirmation.notices.as_slice(),
        [StorageNotice::CorruptCollection { .. }]
    ));
    assert_eq!(repository.list().unwrap(), vec![record]);
}

#[test]
fn unavailable_storage_does_not_break_the_flow() {
    let repository = BookingRepository::new(Arc::new(BrokenStore));
    let mut wizard = regular_at_payment();
    wizard.select_payment_method("wallet").unwrap();
    let Ok(StepOutcome::Confirmed(record)) = wizard.advance() else {
        panic!("booking should confirm");
    };

    let confirmation = complete_booking(
        &repository,
        record,
        &ConfirmationSimulator::new(Duration::ZERO),
        &mut RecordingSleeper::default(),
        &mut |_| {},
    );

    assert!(!confirmation.stored);
    assert_eq!(confirmation.route, Route::Home);
    assert!(matches!(
        confirmation.notices.as_slice(),
        [StorageNotice::Unavailable { .. }]
    ));
}

#[test]
fn repository_lists_most_recent_first_and_allows_duplicates() {
    let repository = BookingRepository::new(Arc::new(MemoryStore::new()));
    let mut first = regular_at_payment();
    first.select_payment_method("upi").unwrap();
    let first_record = first.build_record().unwrap();

    let mut second = regular_at_payment();
    second.toggle_option("balcony").unwrap();
    second.select_payment_method("upi").unwrap();
    let second_record = second.build_record().unwrap();

    repository.append(first_record.clone()).unwrap();
    repository.append(first_record.clone()).unwrap();
    let report = repository.append(second_record.clone()).unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(
        repository.list().unwrap(),
        vec![second_record, first_record.clone(), first_record]
    );
}

#[test]
fn empty_store_lists_no_bookings() {
    let repository = BookingRepository::new(Arc::new(MemoryStore::new()));
    let load = repository.load().unwrap();
    assert!(load.records.is_empty());
    assert!(load.recovered.is_none());
}

#[test]
fn fallback_catalog_books_with_its_single_option() {
    let mut wizard = wizard_for("carpet");
    assert_eq!(wizard.catalog().key, "general");
    wizard.select_service("general-standard").unwrap();
    wizard.advance().unwrap();
    wizard.select_date(april_12());
    wizard.select_time("03:00 PM").unwrap();
    wizard.advance().unwrap();
    wizard.select_address("2").unwrap();
    wizard.advance().unwrap();
    wizard.select_payment_method("UPI").unwrap();
    let Ok(StepOutcome::Confirmed(record)) = wizard.advance() else {
        panic!("booking should confirm");
    };
    assert_eq!(record.options, vec!["general-cleaning".to_string()]);
    assert_eq!(record.price, 399);
}

#[test]
fn address_book_seeds_defaults_and_assigns_next_id() {
    let book = AddressBook::new(Arc::new(MemoryStore::new()));
    assert_eq!(book.list().unwrap(), default_addresses());

    let added = book.add("Parents", "7 Lake View, Mysuru").unwrap();
    assert_eq!(added.id, "3");
    assert_eq!(book.list().unwrap().len(), 3);

    let removed = book.remove("1").unwrap();
    assert_eq!(removed.label, "Home");
    assert!(matches!(book.remove("1"), Err(CoreError::AddressNotFound(_))));
    assert!(matches!(book.add(" ", "x"), Err(CoreError::Validation(_))));
}

#[test]
fn address_ids_wrap_to_the_lowest_free_slot_at_the_numeric_limit() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store
        .set_item(
            crate::ADDRESSES_KEY,
            r#"[{"id":"4294967295","label":"Home","line":"x"},{"id":"1","label":"Work","line":"y"}]"#,
        )
        .unwrap();
    let book = AddressBook::new(store);

    let added = book.add("Office", "z").unwrap();
    assert_eq!(added.id, "2");
    let ids: Vec<String> = book.list().unwrap().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["4294967295", "1", "2"]);
}

#[test]
fn address_book_recovers_from_corrupt_data() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.set_item(crate::ADDRESSES_KEY, "[{]").unwrap();
    let book = AddressBook::new(store);
    assert_eq!(book.list().unwrap(), default_addresses());
}
