use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use trivia_core::{
    CreateQuestion, NumericField, QuestionFilter, QuizCategory, RecordStore, SeedData,
    SelectionMode, ServiceConfig, TriviaError, TriviaService,
};
use trivia_db::{Database, MemoryStore};

/// Helper: a service over the demo question bank (19 questions, 6 categories).
fn demo_service() -> TriviaService {
    let store = MemoryStore::new();
    SeedData::demo().apply(&store, false).unwrap();
    TriviaService::new(Arc::new(store), ServiceConfig::default())
}

fn empty_service() -> TriviaService {
    TriviaService::new(Arc::new(MemoryStore::new()), ServiceConfig::default())
}

fn create_payload(category: i64) -> CreateQuestion {
    CreateQuestion {
        question: Some("What is the capital of Australia?".to_string()),
        answer: Some("Canberra".to_string()),
        category: Some(NumericField::Number(category)),
        difficulty: Some(NumericField::Number(2)),
    }
}

// ============================================================
// Categories
// ============================================================

#[test]
fn test_list_categories() {
    let categories = demo_service().list_categories().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0].label, "Science");
}

#[test]
fn test_no_categories_is_not_found() {
    assert!(matches!(
        empty_service().list_categories(),
        Err(TriviaError::NotFound(_))
    ));
}

// ============================================================
// Listing
// ============================================================

#[test]
fn test_list_questions_defaults_to_first_page() {
    let page = demo_service().list_questions(None).unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_count, 19);
    assert_eq!(page.categories.len(), 6);
    assert_eq!(page.items[0].id, 1);
}

#[test]
fn test_page_beyond_range_is_not_found() {
    assert!(matches!(
        demo_service().list_questions(Some(100)),
        Err(TriviaError::NotFound(_))
    ));
}

#[test]
fn test_empty_store_listing_is_not_found() {
    assert!(matches!(
        empty_service().list_questions(None),
        Err(TriviaError::NotFound(_))
    ));
}

#[test]
fn test_page_zero_is_bad_request() {
    assert!(matches!(
        demo_service().list_questions(Some(0)),
        Err(TriviaError::BadRequest(_))
    ));
}

#[test]
fn test_questions_by_category() {
    let page = demo_service().questions_by_category(2, None).unwrap();
    assert_eq!(page.total_count, 4);
    assert!(page.items.iter().all(|q| q.category_id == 2));
    assert_eq!(page.current_category.as_deref(), Some("Art"));
}

#[test]
fn test_questions_by_unknown_category_is_not_found() {
    assert!(matches!(
        demo_service().questions_by_category(99, None),
        Err(TriviaError::NotFound(_))
    ));
}

#[test]
fn test_search() {
    let page = demo_service().search_questions("TIM BURTON", None).unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].answer, "Edward Scissorhands");
}

#[test]
fn test_search_without_matches_is_empty() {
    let page = demo_service()
        .search_questions("supercalifragilistico", None)
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
}

// ============================================================
// Create / delete
// ============================================================

#[test]
fn test_create_question() {
    let service = demo_service();
    let created = service.create_question(&create_payload(3), None).unwrap();

    assert_eq!(created.id, 20);
    assert_eq!(created.page.total_count, 20);
    let stored = service.store().get_question(20).unwrap().unwrap();
    assert_eq!(stored.answer, "Canberra");
}

#[test]
fn test_create_with_missing_field_is_unprocessable() {
    let service = demo_service();
    let mut payload = create_payload(3);
    payload.difficulty = None;

    assert!(matches!(
        service.create_question(&payload, None),
        Err(TriviaError::Unprocessable(_))
    ));
    assert_eq!(service.store().list_questions().unwrap().len(), 19);
}

#[test]
fn test_create_with_unknown_category_is_stored() {
    let service = demo_service();
    let created = service.create_question(&create_payload(10), Some(2)).unwrap();

    assert_eq!(created.id, 20);
    assert_eq!(created.page.total_count, 20);
    assert!(created.page.items.iter().any(|q| q.id == 20 && q.category_id == 10));
    assert!(!created.page.categories.contains_key(&10));

    let page = service
        .queries()
        .query(&QuestionFilter::new().with_category(10), 1)
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, 20);
    assert!(page.current_category.is_none());
}

#[test]
fn test_delete_question() {
    let service = demo_service();
    assert_eq!(service.delete_question(12).unwrap(), 12);
    assert!(service.store().get_question(12).unwrap().is_none());
}

#[test]
fn test_delete_missing_question_is_not_found() {
    assert!(matches!(
        demo_service().delete_question(999),
        Err(TriviaError::NotFound(_))
    ));
}

// ============================================================
// Quiz
// ============================================================

#[test]
fn test_quiz_step() {
    let service = demo_service();
    let mut rng = StdRng::seed_from_u64(5);

    let question = service
        .next_quiz_question(&[16], QuizCategory::Id(1), &mut rng)
        .unwrap()
        .unwrap();

    assert_eq!(question.category_id, 1);
    assert_ne!(question.id, 16);
}

#[test]
fn test_quiz_unknown_category_has_no_question() {
    let mut rng = StdRng::seed_from_u64(5);
    let result = demo_service()
        .next_quiz_question(&[], QuizCategory::Id(99), &mut rng)
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_quiz_exhaustion_is_not_an_error() {
    let mut rng = StdRng::seed_from_u64(5);
    let result = demo_service()
        .next_quiz_question(&[16, 17, 18], QuizCategory::Id(1), &mut rng)
        .unwrap();
    assert!(result.is_none());
}

// ============================================================
// SQLite-backed service
// ============================================================

#[test]
fn test_service_over_sqlite() {
    let db = Database::open_in_memory().unwrap();
    SeedData::demo().apply(&db, false).unwrap();
    let service = TriviaService::new(
        Arc::new(db),
        ServiceConfig {
            page_size: 5,
            selection: SelectionMode::First,
        },
    );

    let page = service.list_questions(Some(4)).unwrap();
    assert_eq!(page.items.len(), 4);
    assert_eq!(page.items[0].id, 16);

    let mut rng = StdRng::seed_from_u64(0);
    let first = service
        .next_quiz_question(&[], QuizCategory::All, &mut rng)
        .unwrap()
        .unwrap();
    assert_eq!(first.id, 1);

    let created = service.create_question(&create_payload(42), None).unwrap();
    assert_eq!(created.id, 20);
    assert_eq!(created.page.total_count, 20);
    assert!(!created.page.categories.contains_key(&42));
}
