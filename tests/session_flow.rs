use asset_tracker::prelude::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
}

async fn run(store: &InMemoryAssetStore, answers: &[&str]) -> ScriptedConsole {
    let offices = OfficeTable::default();
    let mut console = ScriptedConsole::new(answers.iter().copied());
    Session::new(store, &mut console, &offices, today())
        .with_color(false)
        .run()
        .await
        .expect("session should end cleanly");
    console
}

#[tokio::test]
async fn test_create_then_list() {
    let store = InMemoryAssetStore::new();
    let console = run(
        &store,
        &["2", "Phone", "iPhone", "madrid", "499.99", "2019-05-11", "1", "5"],
    )
    .await;

    let assets = store.get_all().await.unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].office, "Madrid");

    let transcript = console.transcript();
    assert!(transcript.contains("Created asset 1."));
    assert!(transcript.contains("429.99 EUR"));
    assert!(transcript.contains("2022-05-11"));
    assert!(transcript.ends_with("Goodbye."));
}

#[tokio::test]
async fn test_invalid_choice_redisplays_menu() {
    let store = InMemoryAssetStore::new();
    let console = run(&store, &["9", "5"]).await;

    assert!(store.get_all().await.unwrap().is_empty());
    let menus = console.output().iter().filter(|s| s.as_str() == asset_tracker::session::MENU).count();
    assert_eq!(menus, 2);
    assert!(console.transcript().contains("Invalid menu choice: '9' is not between 1 and 5"));
}

#[tokio::test]
async fn test_edit_and_delete_unknown_ids_are_reported() {
    let store = InMemoryAssetStore::new();
    let console = run(&store, &["3", "7", "4", "8", "5"]).await;

    let transcript = console.transcript();
    assert!(transcript.contains("Asset 7 not found."));
    assert!(transcript.contains("Asset 8 not found."));
    assert!(transcript.ends_with("Goodbye."));
}

#[tokio::test]
async fn test_edit_changes_only_answered_fields() {
    let store = InMemoryAssetStore::new();
    let id = store
        .create(&NewAsset::new(
            AssetKind::Laptop,
            "ThinkPad",
            "Miami",
            dec!(1200),
            NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
        ))
        .await
        .unwrap();

    run(&store, &["3", "1", "", "", "Stockholm", "", "", "5"]).await;

    let edited = store.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(edited.id, id);
    assert_eq!(edited.name, "ThinkPad");
    assert_eq!(edited.office, "Stockholm");
    assert_eq!(edited.price, dec!(1200));
}

#[tokio::test]
async fn test_delete_removes_asset() {
    let store = InMemoryAssetStore::new();
    let id = store
        .create(&NewAsset::new(
            AssetKind::Phone,
            "Pixel",
            "Madrid",
            dec!(300),
            NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
        ))
        .await
        .unwrap();

    let console = run(&store, &["4", "abc", "1", "1", "5"]).await;

    assert!(store.get_by_id(id).await.unwrap().is_none());
    let transcript = console.transcript();
    assert!(transcript.contains("Invalid id: 'abc' is not a positive number"));
    assert!(transcript.contains("Deleted asset 1 (Pixel)."));
    assert!(transcript.contains("No assets registered."));
}

#[tokio::test]
async fn test_unknown_office_report_error_keeps_session_alive() {
    let store = InMemoryAssetStore::new();
    store
        .create(&NewAsset::new(
            AssetKind::Laptop,
            "Legacy",
            "",
            dec!(10),
            NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
        ))
        .await
        .unwrap();

    let console = run(&store, &["1", "5"]).await;

    assert!(console.transcript().contains("Office '' has no currency configured"));
    assert!(console.transcript().ends_with("Goodbye."));
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let store = InMemoryAssetStore::new();
    let console = run(&store, &["2", "Phone", "iPhone"]).await;

    assert!(store.get_all().await.unwrap().is_empty());
    assert!(!console.transcript().contains("Goodbye."));
}

/// Answers from a script, but cancels the prompt at position `cancel_at`.
struct CancellingConsole {
    inner: ScriptedConsole,
    cancel_at: usize,
    asked: usize,
}

impl Console for CancellingConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AssetError> {
        let position = self.asked;
        self.asked += 1;
        if position == self.cancel_at {
            return Err(AssetError::Cancelled);
        }
        self.inner.read_line(prompt)
    }

    fn show(&mut self, text: &str) {
        self.inner.show(text);
    }
}

#[tokio::test]
async fn test_cancelled_prompt_returns_to_menu() {
    let store = InMemoryAssetStore::new();
    let offices = OfficeTable::default();
    // Prompt 3 is the office of the first create; the script resumes at the menu.
    let mut console = CancellingConsole {
        inner: ScriptedConsole::new(["2", "Phone", "iPhone", "1", "5"]),
        cancel_at: 3,
        asked: 0,
    };

    Session::new(&store, &mut console, &offices, today())
        .with_color(false)
        .run()
        .await
        .expect("cancelling a prompt must not end the session");

    assert!(store.get_all().await.unwrap().is_empty());
    let output = console.inner.output();
    let menus = output.iter().filter(|s| s.as_str() == asset_tracker::session::MENU).count();
    assert_eq!(menus, 3);
    assert!(output.iter().any(|s| s == "Cancelled."));
    assert!(console.inner.transcript().contains("No assets registered."));
    assert!(console.inner.transcript().ends_with("Goodbye."));
}

#[tokio::test]
async fn test_cancelled_menu_prompt_shows_menu_again() {
    let store = InMemoryAssetStore::new();
    let offices = OfficeTable::default();
    let mut console = CancellingConsole {
        inner: ScriptedConsole::new(["5"]),
        cancel_at: 0,
        asked: 0,
    };

    Session::new(&store, &mut console, &offices, today()).run().await.unwrap();

    let menus = console.inner.output().iter().filter(|s| s.as_str() == asset_tracker::session::MENU).count();
    assert_eq!(menus, 2);
    assert!(console.inner.transcript().ends_with("Goodbye."));
}
