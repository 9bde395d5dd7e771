mod common;

use common::create_test_db;

#[tokio::test]
async fn test_db_connection() {
    let db = create_test_db().await;
    assert!(db.migration_applied("V1").await.unwrap());
}

#[tokio::test]
async fn test_quiz_crud() {
    let db = create_test_db().await;

    let quiz_id = db.create_quiz("What is 1+1?", "2", 0).await.unwrap();

    let quiz = db.quiz(quiz_id).await.unwrap().unwrap();
    assert_eq!(quiz.question, "What is 1+1?");
    assert_eq!(quiz.answer, "2");

    db.update_quiz(quiz_id, "What is 2+2?", "4").await.unwrap();
    let quiz = db.quiz(quiz_id).await.unwrap().unwrap();
    assert_eq!(quiz.question, "What is 2+2?");
    assert_eq!(quiz.answer, "4");

    db.delete_quiz(quiz_id).await.unwrap();
    assert!(db.quiz(quiz_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_quiz_author_is_joined() {
    let db = create_test_db().await;

    let user_id = db.create_user("alice", "pw-alice", false).await.unwrap();
    let quiz_id = db.create_quiz("Q?", "A", user_id).await.unwrap();

    let quiz = db.quiz(quiz_id).await.unwrap().unwrap();
    assert_eq!(quiz.author_id, user_id);
    assert_eq!(quiz.author_name.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_quiz_search_matches_with_wildcards() {
    let db = create_test_db().await;

    db.create_quiz("Capital of France?", "Paris", 0)
        .await
        .unwrap();
    db.create_quiz("Capital of Spain?", "Madrid", 0)
        .await
        .unwrap();
    db.create_quiz("What is 1+1?", "2", 0).await.unwrap();

    // Whitespace in the search acts as a wildcard.
    assert_eq!(db.count_quizzes(Some("capital france"), None).await.unwrap(), 1);
    assert_eq!(db.count_quizzes(Some("Capital"), None).await.unwrap(), 2);
    assert_eq!(db.count_quizzes(None, None).await.unwrap(), 3);

    let page = db
        .quizzes_page(Some("capital france"), None, 10, 0)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].answer, "Paris");
}

#[tokio::test]
async fn test_quiz_pagination() {
    let db = create_test_db().await;

    for i in 0..25 {
        db.create_quiz(&format!("Question {i}?"), "x", 0)
            .await
            .unwrap();
    }

    assert_eq!(db.count_quizzes(None, None).await.unwrap(), 25);

    let first = db.quizzes_page(None, None, 10, 0).await.unwrap();
    let second = db.quizzes_page(None, None, 10, 10).await.unwrap();
    let third = db.quizzes_page(None, None, 10, 20).await.unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 10);
    assert_eq!(third.len(), 5);
    assert_ne!(first[0].id, second[0].id);
}

#[tokio::test]
async fn test_quizzes_filtered_by_author() {
    let db = create_test_db().await;

    let alice = db.create_user("alice", "pw-alice", false).await.unwrap();
    let bob = db.create_user("bob", "pw-bob", false).await.unwrap();

    db.create_quiz("From alice?", "yes", alice).await.unwrap();
    db.create_quiz("From bob?", "yes", bob).await.unwrap();

    assert_eq!(db.count_quizzes(None, Some(alice)).await.unwrap(), 1);
    let page = db.quizzes_page(None, Some(alice), 10, 0).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].question, "From alice?");
}

#[tokio::test]
async fn test_all_quizzes_returns_full_catalog() {
    let db = create_test_db().await;

    for i in 0..3 {
        db.create_quiz(&format!("Q{i}?"), "a", 0).await.unwrap();
    }

    let catalog = db.all_quizzes().await.unwrap();
    assert_eq!(catalog.len(), 3);
}

#[tokio::test]
async fn test_tip_lifecycle() {
    let db = create_test_db().await;

    let quiz_id = db.create_quiz("Q?", "A", 0).await.unwrap();
    let tip_id = db.create_tip(quiz_id, "think binary", 0).await.unwrap();

    let tip = db.tip(tip_id).await.unwrap().unwrap();
    assert!(!tip.accepted);
    assert_eq!(tip.quiz_id, quiz_id);

    db.accept_tip(tip_id).await.unwrap();
    assert!(db.tip(tip_id).await.unwrap().unwrap().accepted);

    // Editing a tip sends it back to pending.
    db.update_tip(tip_id, "think in base 2").await.unwrap();
    let tip = db.tip(tip_id).await.unwrap().unwrap();
    assert_eq!(tip.text, "think in base 2");
    assert!(!tip.accepted);

    db.delete_tip(tip_id).await.unwrap();
    assert!(db.tip(tip_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_tips_deleted_with_their_quiz() {
    let db = create_test_db().await;

    let quiz_id = db.create_quiz("Q?", "A", 0).await.unwrap();
    let tip_id = db.create_tip(quiz_id, "a hint", 0).await.unwrap();

    db.delete_quiz(quiz_id).await.unwrap();
    assert!(db.tip(tip_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_password_verification() {
    let db = create_test_db().await;

    db.create_user("carol", "s3cret", false).await.unwrap();

    assert!(db.verify_user_password("carol", "s3cret").await.unwrap());
    assert!(!db.verify_user_password("carol", "wrong").await.unwrap());
    assert!(!db.verify_user_password("nobody", "s3cret").await.unwrap());
}

#[tokio::test]
async fn test_user_sessions() {
    let db = create_test_db().await;

    let user_id = db.create_user("dave", "pw-dave", false).await.unwrap();
    let token = db.create_user_session(user_id).await.unwrap();

    let user = db.get_user_by_session(&token).await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "dave");

    db.delete_user_session(&token).await.unwrap();
    assert!(db.get_user_by_session(&token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_seed_admin_is_idempotent() {
    let db = create_test_db().await;

    db.seed_admin("admin", "first").await.unwrap();
    db.seed_admin("admin", "second").await.unwrap();

    // First seed wins; the password is not overwritten.
    assert!(db.verify_user_password("admin", "first").await.unwrap());
    let admin = db.find_user_by_username("admin").await.unwrap().unwrap();
    assert!(admin.is_admin);
}
