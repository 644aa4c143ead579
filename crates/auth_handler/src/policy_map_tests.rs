use super::*;
use crate::InMemoryStorage;

fn stores() -> (PolicyMappingStore, PolicyMappingStore) {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    (
        PolicyMappingStore::new(storage.clone(), MappingKind::Teams),
        PolicyMappingStore::new(storage, MappingKind::Users),
    )
}

#[test]
fn test_policy_set_parse_splits_on_commas_and_whitespace() {
    let set = PolicySet::parse(" dev,ops  admin,,dev\tAudit ");

    assert_eq!(set.into_vec(), vec!["Audit", "admin", "dev", "ops"]);
}

#[test]
fn test_policy_set_parse_of_blank_input_is_empty() {
    assert!(PolicySet::parse("").is_empty());
    assert!(PolicySet::parse(" , ,").is_empty());
}

#[test]
fn test_policy_set_value_string() {
    let set: PolicySet = ["root", "admin"].into_iter().collect();

    assert_eq!(set.to_value_string(), "admin,root");
    assert_eq!(set.to_string(), "admin,root");
}

#[test]
fn test_policy_set_extend_unions() {
    let mut set = PolicySet::parse("a,b");
    set.extend(PolicySet::parse("b,c"));

    assert_eq!(set.len(), 3);
    assert!(set.contains("c"));
}

#[tokio::test]
async fn test_write_then_read_is_case_insensitive() {
    let (teams, _) = stores();

    let written = teams.write_mapping("Owners", "root").await.unwrap();
    let read = teams.read_mapping("owners").await.unwrap();
    let read_mixed = teams.read_mapping("  oWnErs ").await.unwrap();

    assert_eq!(written, PolicySet::parse("root"));
    assert_eq!(read, Some(written.clone()));
    assert_eq!(read_mixed, Some(written));
}

#[tokio::test]
async fn test_write_replaces_previous_policies() {
    let (teams, _) = stores();

    teams.write_mapping("dev", "a,b").await.unwrap();
    teams.write_mapping("dev", "c").await.unwrap();

    assert_eq!(
        teams.read_mapping("dev").await.unwrap(),
        Some(PolicySet::parse("c"))
    );
}

#[tokio::test]
async fn test_read_missing_mapping_is_none() {
    let (teams, _) = stores();

    assert_eq!(teams.read_mapping("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_write_rejects_empty_name_and_empty_policies() {
    let (teams, _) = stores();

    assert!(matches!(
        teams.write_mapping("  ", "root").await,
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        teams.write_mapping("dev", " , ").await,
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        teams.write_mapping("dev/ops", "root").await,
        Err(AuthError::Validation(_))
    ));
    assert!(teams.list_mappings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (teams, _) = stores();
    teams.write_mapping("dev", "a").await.unwrap();

    teams.delete_mapping("DEV").await.unwrap();
    teams.delete_mapping("dev").await.unwrap();

    assert_eq!(teams.read_mapping("dev").await.unwrap(), None);
}

#[tokio::test]
async fn test_list_is_sorted_and_scoped_to_kind() {
    let (teams, users) = stores();
    teams.write_mapping("Owners", "root").await.unwrap();
    teams.write_mapping("default", "base").await.unwrap();
    users.write_mapping("octocat", "admin").await.unwrap();

    assert_eq!(
        teams.list_mappings().await.unwrap(),
        vec!["default".to_string(), "owners".to_string()]
    );
    assert_eq!(users.list_mappings().await.unwrap(), vec!["octocat".to_string()]);
}

#[tokio::test]
async fn test_teams_and_users_do_not_share_keys() {
    let (teams, users) = stores();
    teams.write_mapping("octocat", "team-policy").await.unwrap();

    assert_eq!(users.read_mapping("octocat").await.unwrap(), None);
}
