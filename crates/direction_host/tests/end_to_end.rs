use std::rc::Rc;

use direction_host::{
    ApplierState, DirectionApplier, DirectionContext, DirectionRepository, DirectionSettings,
    MemoryDocument, MemoryStorageProvider, NoopStorageProvider, StorageSelector,
};
use futures::executor::block_on;
use pretty_assertions::assert_eq;

fn shared_storage() -> MemoryStorageProvider {
    MemoryStorageProvider::default()
}

fn context_over(storage: &MemoryStorageProvider) -> DirectionContext {
    // Mirrors an installed extension where the preferred backend is missing.
    let selector = StorageSelector::default()
        .with_provider(NoopStorageProvider)
        .with_provider(storage.clone());
    DirectionContext::new(DirectionSettings::default(), selector)
}

#[test]
fn popup_edits_survive_a_reload_from_storage() {
    let storage = shared_storage();
    let popup = context_over(&storage);

    let snapshot = block_on(popup.load_configs());
    let id = snapshot.current.id().to_string();
    assert_eq!(id, "default-config");
    assert!(!snapshot.current.is_rtl());

    block_on(popup.add_url(&id, "example.com")).expect("add url");
    block_on(popup.toggle_direction(&id)).expect("toggle direction");

    let reloaded = context_over(&storage);
    let record = block_on(reloaded.repository().find_by_id(&id)).expect("record persisted");
    assert!(record.is_rtl());
    assert!(record.enabled());
    assert_eq!(record.target_urls(), ["example.com".to_string()]);
    assert!(record.updated_at() >= record.created_at());
}

#[test]
fn content_script_forces_direction_and_keeps_it_sticky() {
    let storage = shared_storage();
    let popup = context_over(&storage);
    let id = block_on(popup.load_configs()).current.id().to_string();
    block_on(popup.add_url(&id, "example.com")).expect("add url");
    block_on(popup.toggle_direction(&id)).expect("toggle direction");

    let page = context_over(&storage);
    let document = MemoryDocument::new("https://www.example.com/articles/1");
    let applier = DirectionApplier::new(Rc::new(document.clone()));

    let state = block_on(applier.run(page.repository().as_ref()));
    assert_eq!(state, ApplierState::Observing);
    assert_eq!(document.root().dir.as_deref(), Some("rtl"));
    assert_eq!(document.body().expect("body").dir.as_deref(), Some("rtl"));

    let injected = document.insert_element(Some("ltr"));
    assert_eq!(document.element_dir(injected).as_deref(), Some("rtl"));

    applier.invalidate();
    let after_unload = document.insert_element(Some("ltr"));
    assert_eq!(document.element_dir(after_unload).as_deref(), Some("ltr"));
}

#[test]
fn toggling_enabled_off_leaves_pages_untouched() {
    let storage = shared_storage();
    let popup = context_over(&storage);
    let id = block_on(popup.load_configs()).current.id().to_string();
    block_on(popup.add_url(&id, "example.com")).expect("add url");
    block_on(popup.toggle_enabled(&id)).expect("disable");

    let document = MemoryDocument::new("https://example.com/");
    let applier = DirectionApplier::new(Rc::new(document.clone()));
    let state = block_on(applier.run(context_over(&storage).repository().as_ref()));
    assert_eq!(state, ApplierState::Idle);
    assert_eq!(document.root().dir, None);
}

#[test]
fn saving_an_existing_id_never_grows_the_store() {
    let storage = shared_storage();
    let popup = context_over(&storage);
    let current = block_on(popup.load_configs()).current;
    let repo = popup.repository();
    for _ in 0..3 {
        block_on(repo.save(&current));
    }
    assert_eq!(block_on(repo.find_all()).len(), 1);

    block_on(popup.clear_configs());
    assert!(block_on(repo.find_all()).is_empty());
}

#[test]
fn storage_with_no_backend_never_fails() {
    let popup = DirectionContext::new(
        DirectionSettings::default(),
        StorageSelector::default().with_provider(NoopStorageProvider),
    );
    let snapshot = block_on(popup.load_configs());
    assert_eq!(snapshot.current.id(), "default-config");
    assert_eq!(snapshot.configs.len(), 1);
    assert!(block_on(popup.repository().find_all()).is_empty());
}
