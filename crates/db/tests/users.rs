mod common;

use common::{auditor, constraint_of, new_user, user};
use postertrack_core::roles::Role;
use postertrack_db::repositories::UserRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    user(&pool, "am@example.com", Role::AccountManager).await;

    let err = UserRepo::create(&pool, &new_user("am@example.com", Role::FieldAuditor))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_one_super_admin_may_exist(pool: PgPool) {
    assert!(!UserRepo::super_admin_exists(&pool).await.unwrap());
    user(&pool, "root@example.com", Role::SuperAdmin).await;
    assert!(UserRepo::super_admin_exists(&pool).await.unwrap());

    let err = UserRepo::create(&pool, &new_user("root2@example.com", Role::SuperAdmin))
        .await
        .unwrap_err();
    assert_eq!(
        constraint_of(&err).as_deref(),
        Some("uq_users_single_super_admin")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn roster_is_in_creation_order_and_excludes_other_roles(pool: PgPool) {
    let first = auditor(&pool, "a1@example.com", &["Lagos"]).await;
    user(&pool, "client@example.com", Role::ClientAgencyUser).await;
    let second = auditor(&pool, "a2@example.com", &["Kano", "lagos"]).await;

    let roster = UserRepo::field_auditor_roster(&pool).await.unwrap();
    let ids: Vec<i64> = roster.iter().map(|r| r.auditor_id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(roster[1].states, vec!["Kano".to_string(), "lagos".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_with_role_checks_the_role(pool: PgPool) {
    let am = user(&pool, "am@example.com", Role::AccountManager).await;

    assert!(UserRepo::find_with_role(&pool, am.id, Role::AccountManager)
        .await
        .unwrap()
        .is_some());
    assert!(UserRepo::find_with_role(&pool, am.id, Role::ClientAgencyUser)
        .await
        .unwrap()
        .is_none());
}
