use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use learnify_core::model::{CourseId, GameId, ModuleId};
use learnify_core::scoring::{FeedbackMessage, ScoreColor};
use learnify_core::time::fixed_now;
use services::dashboard::GREETINGS;
use services::payload::{
    CompletedModulePayload, CourseProgressPayload, DashboardPayload, GameResultPayload,
    GameSubmissionPayload, SaveProgressPayload,
};
use services::{ApiError, Clock, DashboardApi, DashboardError, DashboardService, PayloadError};

/// In-memory stand-in for the remote dashboard API.
#[derive(Default)]
struct FakeApi {
    dashboard: Mutex<DashboardPayload>,
    saved: Mutex<Vec<SaveProgressPayload>>,
    submitted: Mutex<Vec<(ModuleId, GameId, GameSubmissionPayload)>>,
    deleted: Mutex<Vec<CourseId>>,
    fail_with: Option<(u16, &'static str)>,
}

impl FakeApi {
    fn with_dashboard(dashboard: DashboardPayload) -> Self {
        Self {
            dashboard: Mutex::new(dashboard),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ApiError> {
        match self.fail_with {
            Some((status, message)) => Err(ApiError::Server {
                status,
                message: message.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn fetch_dashboard(&self) -> Result<DashboardPayload, ApiError> {
        self.check()?;
        Ok(self.dashboard.lock().unwrap().clone())
    }

    async fn save_progress(&self, payload: &SaveProgressPayload) -> Result<(), ApiError> {
        self.check()?;
        self.saved.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn submit_game(
        &self,
        module_id: &ModuleId,
        game_id: &GameId,
        submission: &GameSubmissionPayload,
    ) -> Result<(), ApiError> {
        self.check()?;
        self.submitted
            .lock()
            .unwrap()
            .push((module_id.clone(), game_id.clone(), submission.clone()));
        Ok(())
    }

    async fn fetch_module_results(
        &self,
        module_id: &ModuleId,
        course_id: &CourseId,
    ) -> Result<Vec<GameResultPayload>, ApiError> {
        self.check()?;
        let dashboard = self.dashboard.lock().unwrap();
        Ok(dashboard
            .course_modules
            .iter()
            .filter(|c| c.course_id == course_id.as_str())
            .flat_map(|c| c.completed_modules.iter())
            .filter(|m| m.module_id == module_id.as_str())
            .flat_map(|m| m.game_results.clone())
            .collect())
    }

    async fn delete_course(&self, course_id: &CourseId) -> Result<(), ApiError> {
        self.check()?;
        self.deleted.lock().unwrap().push(course_id.clone());
        Ok(())
    }
}

fn game(id: &str, score: u32, total: u32) -> GameResultPayload {
    GameResultPayload {
        game_id: id.into(),
        game_title: format!("Game {id}"),
        score,
        total,
        timestamp: fixed_now(),
    }
}

fn module(id: &str, games: Vec<GameResultPayload>) -> CompletedModulePayload {
    CompletedModulePayload {
        module_id: id.into(),
        title: format!("Module {id}"),
        completed_at: Some(fixed_now()),
        game_results: games,
    }
}

/// c1 is finished (five modules), c2 is halfway.
fn sample_dashboard() -> DashboardPayload {
    DashboardPayload {
        name: "Asha".into(),
        grade: "9".into(),
        board: "CBSE".into(),
        course_modules: vec![
            CourseProgressPayload {
                course_id: "c1".into(),
                title: Some("Optics".into()),
                course_title: None,
                course: None,
                completed_modules: vec![
                    module("m1", vec![game("q1", 3, 5), game("p1", 5, 5)]), // 80
                    module("m2", vec![game("q2", 2, 5)]),                   // 40
                    module("m3", vec![game("q3", 9, 10)]),                  // 90
                    module("m4", vec![game("q4", 7, 10), game("f4", 8, 10)]), // 75
                    module("m5", vec![game("q5", 10, 10)]),                 // 100
                ],
            },
            CourseProgressPayload {
                course_id: "c2".into(),
                title: None,
                course_title: None,
                course: Some("Fractions".into()),
                completed_modules: vec![
                    module("n1", vec![]),
                    module("n2", vec![game("s", 1, 2)]),
                ],
            },
        ],
    }
}

fn service(api: Arc<FakeApi>) -> DashboardService {
    DashboardService::new(api, Clock::fixed(fixed_now()), 75)
}

#[tokio::test]
async fn overview_aggregates_finished_and_unfinished_courses() {
    let api = Arc::new(FakeApi::with_dashboard(sample_dashboard()));
    let svc = service(Arc::clone(&api));

    let overview = svc
        .load_overview(&mut StdRng::seed_from_u64(1))
        .await
        .expect("overview");

    assert_eq!(overview.learner.name, "Asha");
    assert_eq!(overview.total_courses, 2);
    assert!(overview.greeting.contains("Asha"));
    assert!(
        GREETINGS
            .iter()
            .any(|g| g.replace("{name}", "Asha") == overview.greeting)
    );

    let finished = &overview.courses[0];
    assert!(finished.is_complete);
    assert_eq!(finished.completion_percent, 100);
    let report = finished.report.as_ref().expect("report for finished course");
    // (80 + 40 + 90 + 75 + 100) / 5 = 77
    assert_eq!(report.score, 77);
    assert_eq!(report.color, ScoreColor::Warning);
    assert_eq!(report.feedback, FeedbackMessage::WellDone);
    let review: Vec<_> = report.review.iter().map(|m| m.module_id.as_str()).collect();
    assert_eq!(review, ["m2"]);

    let halfway = &overview.courses[1];
    assert_eq!(halfway.title, "Fractions");
    assert_eq!(halfway.completion_percent, 40);
    assert!(halfway.report.is_none());
    assert_eq!(halfway.modules[0].score, 0);
    assert_eq!(halfway.modules[1].score, 50);
}

#[tokio::test]
async fn overview_is_stable_for_the_same_seed() {
    let api = Arc::new(FakeApi::with_dashboard(sample_dashboard()));
    let svc = service(api);

    let a = svc.load_overview(&mut StdRng::seed_from_u64(9)).await.unwrap();
    let b = svc.load_overview(&mut StdRng::seed_from_u64(9)).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn malformed_dashboard_is_rejected() {
    let mut payload = sample_dashboard();
    payload.course_modules[1].completed_modules.push(module("n1", vec![]));
    let svc = service(Arc::new(FakeApi::with_dashboard(payload)));

    let err = svc.load_dashboard().await.unwrap_err();
    assert!(matches!(err, DashboardError::Payload(PayloadError::Course(_))));
}

#[tokio::test]
async fn server_errors_surface_their_message() {
    let api = FakeApi {
        fail_with: Some((500, "Failed to fetch dashboard")),
        ..FakeApi::default()
    };
    let svc = service(Arc::new(api));

    let err = svc.load_dashboard().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch dashboard (status 500)");
}

#[tokio::test]
async fn submitted_game_is_saved_under_its_course() {
    let api = Arc::new(FakeApi::with_dashboard(sample_dashboard()));
    let svc = service(Arc::clone(&api));

    let result = svc
        .submit_game(
            &ModuleId::new("n2").unwrap(),
            GameId::new("quiz-9").unwrap(),
            "Quick Quiz",
            &GameSubmissionPayload::new(4, 5),
        )
        .await
        .expect("submit");
    assert_eq!(result.timestamp, fixed_now());
    assert_eq!(result.game_title, "Quick Quiz");

    let submitted = api.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].0.as_str(), "n2");
    assert_eq!(submitted[0].1.as_str(), "quiz-9");
    assert_eq!((submitted[0].2.score, submitted[0].2.total), (4, 5));

    let saved = api.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].course_id, "c2");
    assert_eq!(saved[0].completed_module.module_id, "n2");
    assert_eq!(saved[0].completed_module.title, "Module n2");
    let game = saved[0].game_result.as_ref().unwrap();
    assert_eq!((game.score, game.total), (4, 5));
    assert_eq!(game.timestamp, fixed_now());
}

#[tokio::test]
async fn game_for_an_unfinished_module_is_not_saved() {
    let api = Arc::new(FakeApi::with_dashboard(sample_dashboard()));
    let svc = service(Arc::clone(&api));

    let err = svc
        .submit_game(
            &ModuleId::new("n3").unwrap(),
            GameId::new("quiz-9").unwrap(),
            "Quick Quiz",
            &GameSubmissionPayload::new(1, 5),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::UnknownModule(ref id) if id.as_str() == "n3"));
    assert_eq!(api.submitted.lock().unwrap().len(), 1);
    assert!(api.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn module_can_be_marked_completed_without_a_game() {
    let api = Arc::new(FakeApi::default());
    let svc = service(Arc::clone(&api));

    svc.mark_module_completed(
        &CourseId::new("c1").unwrap(),
        &ModuleId::new("m4").unwrap(),
        "Lenses",
    )
    .await
    .expect("mark");

    let saved = api.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].course_id, "c1");
    assert_eq!(saved[0].completed_module.title, "Lenses");
    assert!(saved[0].game_result.is_none());
}

#[tokio::test]
async fn module_results_are_validated() {
    let api = Arc::new(FakeApi::with_dashboard(sample_dashboard()));
    let svc = service(api);

    let results = svc
        .module_results(&ModuleId::new("m1").unwrap(), &CourseId::new("c1").unwrap())
        .await
        .unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.game_id.as_str()).collect();
    assert_eq!(ids, ["q1", "p1"]);

    let mut broken = sample_dashboard();
    broken.course_modules[0].completed_modules[0].game_results[0].game_id = String::new();
    let svc = service(Arc::new(FakeApi::with_dashboard(broken)));
    let err = svc
        .module_results(&ModuleId::new("m1").unwrap(), &CourseId::new("c1").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Payload(PayloadError::InvalidId { field: "gameId", .. })
    ));
}

#[tokio::test]
async fn only_finished_courses_can_be_deleted() {
    let api = Arc::new(FakeApi::with_dashboard(sample_dashboard()));
    let svc = service(Arc::clone(&api));
    let mut dashboard = svc.load_dashboard().await.unwrap();

    let err = svc
        .delete_course(&mut dashboard, &CourseId::new("c2").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::CourseNotComplete(ref id) if id.as_str() == "c2"));

    let err = svc
        .delete_course(&mut dashboard, &CourseId::new("zz").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::UnknownCourse(_)));
    assert!(api.deleted.lock().unwrap().is_empty());
    assert_eq!(dashboard.courses.len(), 2);

    let removed = svc
        .delete_course(&mut dashboard, &CourseId::new("c1").unwrap())
        .await
        .unwrap();
    assert_eq!(removed.display_title(), "Optics");
    assert_eq!(
        api.deleted.lock().unwrap().as_slice(),
        [CourseId::new("c1").unwrap()]
    );
    let left: Vec<_> = dashboard.courses.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(left, ["c2"]);
}

#[tokio::test]
async fn failed_delete_keeps_the_course() {
    let svc = service(Arc::new(FakeApi::with_dashboard(sample_dashboard())));
    let mut dashboard = svc.load_dashboard().await.unwrap();

    let failing = service(Arc::new(FakeApi {
        fail_with: Some((403, "Not allowed")),
        ..FakeApi::default()
    }));
    let err = failing
        .delete_course(&mut dashboard, &CourseId::new("c1").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Api(ApiError::Server { status: 403, .. })));
    assert_eq!(dashboard.courses.len(), 2);
}
