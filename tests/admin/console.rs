//! Records of several kinds edited through facades and the tenant editor.

use crate::common::init_logging;
use uid_scim::config::ServiceConfig;
use uid_scim::error::{ScimError, ScimType};
use uid_scim::search::SortOrder;
use uid_scim::uid::{
    Claim, Facade, InMemoryUidStore, PageRequest, Participant, ParticipantType, Role, Tenant,
    TenantEditor, User,
};

async fn seeded() -> InMemoryUidStore {
    init_logging();
    let store = InMemoryUidStore::new();

    let types = Facade::<ParticipantType>::new(store.clone());
    for (id, name) in [("broker", "Broker"), ("carrier", "Carrier")] {
        types
            .create(ParticipantType {
                id: id.to_string(),
                name: name.to_string(),
            })
            .await
            .unwrap();
    }

    let participants = Facade::<Participant>::new(store.clone());
    participants
        .create(Participant {
            id: "p-1".to_string(),
            name: "Northwind".to_string(),
            participant_type: "broker".to_string(),
        })
        .await
        .unwrap();

    let roles = Facade::<Role>::new(store.clone());
    for (id, name) in [("admin", "Administrator"), ("read", "Reader")] {
        roles
            .create(Role {
                id: id.to_string(),
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
    }

    let users = Facade::<User>::new(store.clone());
    for (id, name) in [
        ("u1", "Bernd Kraus"),
        ("u2", "Peter Gibbons"),
        ("u3", "Ana Lopez"),
        ("u4", "Bob Slydell"),
    ] {
        users
            .create(User {
                id: id.to_string(),
                name: name.to_string(),
                participant: Some("p-1".to_string()),
                tenant: None,
            })
            .await
            .unwrap();
    }
    store
}

#[tokio::test]
async fn test_kinds_share_one_store() {
    let store = seeded().await;
    let stats = store.stats().await;
    assert_eq!(stats.get("ParticipantType"), Some(&2));
    assert_eq!(stats.get("Participant"), Some(&1));
    assert_eq!(stats.get("Role"), Some(&2));
    assert_eq!(stats.get("User"), Some(&4));
    assert_eq!(stats.get("Tenant"), None);

    // the same key in another kind is a different record
    let tenants = Facade::<Tenant>::new(store.clone());
    tenants.create(Tenant::new("admin", "Admin tenant")).await.unwrap();
    let roles = Facade::<Role>::new(store.clone());
    let role = roles.lookup("admin").await.unwrap().unwrap();
    assert_eq!(role.entity.name, "Administrator");
}

#[tokio::test]
async fn test_paged_user_list() {
    let store = seeded().await;
    let users = Facade::<User>::new(store);
    let config = ServiceConfig::builder().with_page_size(2).build().unwrap();

    let request = PageRequest::first(&config).sort("name", SortOrder::Ascending);
    let first = users.list(&request).await.unwrap();
    assert_eq!(first.total_results, 4);
    assert_eq!(first.start_index, 1);
    let names: Vec<_> = first.resources.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Ana Lopez", "Bernd Kraus"]);

    let second = users.list(&request.next()).await.unwrap();
    assert_eq!(second.start_index, 3);
    let names: Vec<_> = second.resources.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Bob Slydell", "Peter Gibbons"]);

    let third = users.list(&request.next().next()).await.unwrap();
    assert!(third.resources.is_empty());
    assert_eq!(third.total_results, 4);
}

#[tokio::test]
async fn test_filtered_user_list() {
    let store = seeded().await;
    let users = Facade::<User>::new(store);
    let request = PageRequest::new(0, 10)
        .contains("name", "B")
        .sort("id", SortOrder::Descending);
    let page = users.list(&request).await.unwrap();
    let ids: Vec<_> = page.resources.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u4", "u2", "u1"]);
    assert_eq!(users.count(&request.filter).await.unwrap(), 3);
}

#[tokio::test]
async fn test_tenant_with_claims() {
    let store = seeded().await;
    let mut editor = TenantEditor::new(Facade::<Tenant>::new(store.clone()));

    editor.create();
    {
        let tenant = editor.tenant_mut().unwrap();
        tenant.id = "acme".to_string();
        tenant.name = "Acme".to_string();
    }
    assert!(editor.claims_mut().assign(Claim::new("acme", "u1", "admin")));
    assert!(editor.claims_mut().assign(Claim::new("acme", "u2", "read")));
    editor.save().await.unwrap();
    assert!(!editor.is_new());
    assert!(!editor.is_changed());

    // revoking then re-assigning cancels out
    let claim = Claim::new("acme", "u2", "read");
    assert!(editor.claims_mut().revoke(&claim));
    assert!(editor.claims_mut().assign(claim));
    assert!(editor.claims().assigned().is_empty());
    assert!(editor.claims().revoked().is_empty());

    assert!(editor.claims_mut().revoke(&Claim::new("acme", "u1", "admin")));
    editor.save().await.unwrap();

    let stored = Facade::<Tenant>::new(store)
        .lookup("acme")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.entity.claims, vec![Claim::new("acme", "u2", "read")]);
    assert_eq!(Some(&stored.version), editor.version());
}

#[tokio::test]
async fn test_stale_editor_is_rejected() {
    let store = seeded().await;
    let tenants = Facade::<Tenant>::new(store.clone());
    tenants.create(Tenant::new("acme", "Acme")).await.unwrap();

    let mut first = TenantEditor::new(tenants.clone());
    let mut second = TenantEditor::new(tenants.clone());
    first.select("acme").await.unwrap();
    second.select("acme").await.unwrap();

    first.tenant_mut().unwrap().name = "Acme Corporation".to_string();
    first.save().await.unwrap();

    second.tenant_mut().unwrap().active = false;
    second.claims_mut().assign(Claim::new("acme", "u3", "read"));
    let err = second.save().await.unwrap_err();
    assert_eq!(err.status(), 412);
    assert!(second.claims().items().is_empty());

    second.refresh().await.unwrap();
    assert_eq!(second.tenant().unwrap().name, "Acme Corporation");
    assert!(second.tenant().unwrap().active);
}

#[tokio::test]
async fn test_deleted_records() {
    let store = seeded().await;
    let roles = Facade::<Role>::new(store.clone());
    roles.delete("read").await.unwrap();
    assert!(roles.lookup("read").await.unwrap().is_none());
    let err = roles.delete("read").await.unwrap_err();
    assert!(matches!(err, ScimError::NotFound(_)));

    let mut editor = TenantEditor::new(Facade::<Tenant>::new(store));
    let err = editor.select("nowhere").await.unwrap_err();
    assert!(matches!(err, ScimError::NotFound(_)));
    let err = editor.save().await.unwrap_err();
    assert_eq!(err.scim_type(), Some(ScimType::NoTarget));
}
