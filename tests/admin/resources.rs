//! Typed SCIM resources served from the administration records.

use crate::common::{registry, resource_type};
use uid_scim::error::ScimType;
use uid_scim::resource::{
    Account, Claim, Email, EntityTag, MemberType, Name, ScimResource, Tenant, TenantRole, User,
};
use uid_scim::schema::SchemaValidator;
use uid_scim::search::SearchControl;

const BASE_URL: &str = "https://uid.example.com/scim/v2";

fn acme() -> Tenant {
    Tenant::new("acme", "Acme Corporation")
        .active(true)
        .role(TenantRole::new("u1", "admin").display("Bernd Kraus"))
        .role(TenantRole::new("ops", "read").member_type(MemberType::Group))
}

#[test]
fn test_stamped_tenant_is_searchable() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let mut tenant = acme();
    tenant.stamp(Some(BASE_URL)).unwrap();

    let meta = tenant.meta().unwrap();
    assert_eq!(meta.location(), Some("https://uid.example.com/scim/v2/Tenants/acme"));
    assert_eq!(meta.resource_type(), "Tenant");

    let value = tenant.to_value().unwrap();
    let control = SearchControl::from_query(
        tenants,
        [("filter", "roles[type eq \"Group\"] and meta.location ew \"/acme\"")],
    )
    .unwrap();
    let page = control.execute(vec![value], tenants).unwrap();
    assert_eq!(page.total_results, 1);

    let served = Tenant::from_value(page.resources[0].clone()).unwrap();
    assert_eq!(served, tenant);
}

#[test]
fn test_version_follows_content() {
    let mut tenant = acme();
    tenant.stamp(None).unwrap();
    let first = tenant.meta().unwrap().version().cloned().unwrap();
    let header = first.to_string();
    assert!(header.starts_with("W/\""));
    assert!(first.matches(&header));
    assert_eq!(header.parse::<EntityTag>().unwrap(), first);

    tenant.stamp(None).unwrap();
    assert_eq!(tenant.meta().unwrap().version(), Some(&first));

    tenant.active = Some(false);
    tenant.stamp(None).unwrap();
    let second = tenant.meta().unwrap().version().cloned().unwrap();
    assert_ne!(second, first);
    assert!(!second.matches(&header));
    assert!(tenant.meta().unwrap().last_modified() >= tenant.meta().unwrap().created());
}

#[test]
fn test_user_with_account() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let mut user = User::new("bkraus")
        .with_id("u1")
        .name(Name::new("Bernd", "Kraus"))
        .email(Email::new("bernd@home.example.com").kind("home"))
        .email(Email::new("bkraus@acme.example.com").kind("work").primary())
        .account(Account::new("acme").participant("p-1", "broker"));
    user.password = Some("t1meMa$heen".to_string());
    user.stamp(Some(BASE_URL)).unwrap();

    assert_eq!(user.display_name.as_deref(), Some("Bernd Kraus"));
    assert_eq!(
        user.primary_email().map(|e| e.value.as_str()),
        Some("bkraus@acme.example.com")
    );

    let value = user.to_value().unwrap();
    assert!(value.get("password").is_none());
    let report = SchemaValidator::of(users).on_create(&value);
    assert!(report.is_valid(), "{:?}", report);

    let mut moved = value.clone();
    moved["urn:p20:scim:schemas:uid:1.0:Account"]["tenant"] = "initech".into();
    let report = SchemaValidator::of(users).on_replace(&moved, &value);
    assert_eq!(report.throw_violation().unwrap_err().scim_type(), Some(ScimType::Mutability));
}

#[test]
fn test_service_assigned_ids() {
    let mut user = User::new("alopez");
    let id = user.assign_id().to_string();
    user.stamp(Some(BASE_URL)).unwrap();
    let location = user.meta().unwrap().location().unwrap();
    assert_eq!(location, format!("{}/Users/{}", BASE_URL, id));
}

#[test]
fn test_claim_identifiers() {
    let mut claim = Claim::from_id("acme#u1#admin").unwrap();
    assert_eq!(claim.tenant, "acme");
    assert_eq!(claim.user, "u1");
    assert_eq!(claim.role, "admin");
    claim.stamp(Some(BASE_URL)).unwrap();
    assert_eq!(
        claim.meta().unwrap().location(),
        Some("https://uid.example.com/scim/v2/Claims/acme#u1#admin")
    );

    for id in ["acme#u1", "acme##admin", "acme#u1#admin#x"] {
        let err = Claim::from_id(id).unwrap_err();
        assert_eq!(err.scim_type(), Some(ScimType::InvalidValue), "{}", id);
    }
}
