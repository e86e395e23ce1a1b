use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use learnify_core::model::CourseId;
use learnify_core::time::fixed_now;
use services::payload::{AskDoubtPayload, CoursePayload, DoubtPayload, MarkCourseCompletePayload};
use services::{
    ApiError, CatalogueError, CatalogueService, Clock, CourseApi, DoubtApi, DoubtError,
    DoubtService, PayloadError,
};

#[derive(Default)]
struct FakeCourses {
    courses: Vec<CoursePayload>,
    completed: Mutex<Vec<(CourseId, MarkCourseCompletePayload)>>,
}

#[async_trait]
impl CourseApi for FakeCourses {
    async fn list_courses(&self) -> Result<Vec<CoursePayload>, ApiError> {
        Ok(self.courses.clone())
    }

    async fn mark_course_complete(
        &self,
        course_id: &CourseId,
        payload: &MarkCourseCompletePayload,
    ) -> Result<(), ApiError> {
        self.completed
            .lock()
            .unwrap()
            .push((course_id.clone(), payload.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct FakeDoubts {
    answer: Option<&'static str>,
    history: Vec<DoubtPayload>,
    asked: Mutex<Vec<AskDoubtPayload>>,
}

#[async_trait]
impl DoubtApi for FakeDoubts {
    async fn ask_doubt(&self, payload: &AskDoubtPayload) -> Result<Option<DoubtPayload>, ApiError> {
        self.asked.lock().unwrap().push(payload.clone());
        Ok(self.answer.map(|answer| DoubtPayload {
            question: payload.question.clone(),
            answer: Some(answer.to_owned()),
            created_at: Some(fixed_now()),
        }))
    }

    async fn fetch_doubts(&self) -> Result<Vec<DoubtPayload>, ApiError> {
        Ok(self.history.clone())
    }
}

fn course(id: &str, title: &str) -> CoursePayload {
    CoursePayload {
        id: id.into(),
        title: title.into(),
        description: String::new(),
        grade: "9".into(),
        subject: "Physics".into(),
    }
}

fn stored(question: &str, answer: Option<&str>) -> DoubtPayload {
    DoubtPayload {
        question: question.into(),
        answer: answer.map(str::to_owned),
        created_at: Some(fixed_now()),
    }
}

#[tokio::test]
async fn catalogue_is_validated() {
    let api = Arc::new(FakeCourses {
        courses: vec![course("c1", "Optics"), course("c2", "Fractions")],
        ..FakeCourses::default()
    });
    let svc = CatalogueService::new(api, Clock::fixed(fixed_now()));

    let courses = svc.list_courses().await.unwrap();
    let titles: Vec<_> = courses.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Optics", "Fractions"]);

    let broken = Arc::new(FakeCourses {
        courses: vec![course("", "Nameless")],
        ..FakeCourses::default()
    });
    let err = CatalogueService::new(broken, Clock::system())
        .list_courses()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogueError::Payload(PayloadError::InvalidId { field: "id", .. })
    ));
}

#[tokio::test]
async fn marking_complete_is_stamped_with_the_clock() {
    let api = Arc::new(FakeCourses::default());
    let svc = CatalogueService::new(
        Arc::clone(&api) as Arc<dyn CourseApi>,
        Clock::fixed(fixed_now()),
    );

    svc.mark_complete(&CourseId::new("c1").unwrap()).await.unwrap();

    let completed = api.completed.lock().unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].0.as_str(), "c1");
    assert_eq!(completed[0].1.course_id, "c1");
    assert_eq!(completed[0].1.marked_at, fixed_now());
}

#[tokio::test]
async fn short_questions_are_not_sent() {
    let api = Arc::new(FakeDoubts {
        answer: Some("Yes."),
        ..FakeDoubts::default()
    });
    let svc = DoubtService::new(Arc::clone(&api) as Arc<dyn DoubtApi>);

    let err = svc.ask("  ok ").await.unwrap_err();
    assert!(matches!(err, DoubtError::QuestionTooShort { min: 3 }));
    assert!(api.asked.lock().unwrap().is_empty());

    let doubt = svc.ask("  Why is the sky blue? ").await.unwrap();
    assert_eq!(doubt.answer, "Yes.");
    assert_eq!(doubt.question, "Why is the sky blue?");
    assert_eq!(api.asked.lock().unwrap()[0].question, "Why is the sky blue?");
}

#[tokio::test]
async fn reply_without_answer_is_an_error() {
    let svc = DoubtService::new(Arc::new(FakeDoubts::default()));

    let err = svc.ask("What is a prism?").await.unwrap_err();
    assert!(matches!(err, DoubtError::Payload(PayloadError::MissingAnswer)));
}

#[tokio::test]
async fn history_skips_unanswered_doubts() {
    let svc = DoubtService::new(Arc::new(FakeDoubts {
        history: vec![
            stored("What is light?", Some("A wave and a particle.")),
            stored("Still thinking?", None),
            stored("What is a lens?", Some("Curved glass.")),
        ],
        ..FakeDoubts::default()
    }));

    let history = svc.history().await.unwrap();
    let questions: Vec<_> = history.iter().map(|d| d.question.as_str()).collect();
    assert_eq!(questions, ["What is light?", "What is a lens?"]);
}
