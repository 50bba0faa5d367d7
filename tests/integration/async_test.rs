use crate::utils::{Fixture, jan};
use icu_signals::utils::create_load_progress_bar;
use icu_signals::{RecordStore, SignalError, SignalService};

/// Async and rayon loads produce the same store
#[tokio::test]
async fn test_async_load_matches_parallel_load() -> icu_signals::Result<()> {
    let fixture = Fixture::standard();

    let progress = create_load_progress_bar(6, None);
    let async_store = RecordStore::load_async(fixture.config(), Some(progress.clone())).await?;
    let sync_store = fixture.load()?;

    assert_eq!(progress.position(), 6);
    assert_eq!(async_store.summary(), sync_store.summary());
    assert_eq!(async_store.patients(), sync_store.patients());
    assert_eq!(async_store.demand().points(), sync_store.demand().points());
    Ok(())
}

#[tokio::test]
async fn test_async_service_answers_queries() -> icu_signals::Result<()> {
    let fixture = Fixture::standard();
    let service = SignalService::load_async(fixture.config(), None).await?;

    assert_eq!(service.daily_resource_forecast()[0].date, jan(1));
    assert_eq!(service.risk_roster().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_async_load_propagates_fatal_errors() {
    let fixture = Fixture::standard();
    fixture.remove("encounters.csv");

    let err = RecordStore::load_async(fixture.config(), None).await.unwrap_err();
    assert!(matches!(err, SignalError::MissingSource { table: "encounters", .. }));
}
