mod helpers;

use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use helpers::TestApp;
use shared::{
    api::{
        error::ServerError,
        payloads::{
            AmrapResponse, AmrapResult, CreateExercise, CreateTrainingPlan, CreateUser,
            LoginRequest, LoginResponse, Message, PlanVersionChange, RecordWeight,
            ScheduleExercise, TrainingPlanWithExercises, UpdateOneRepMax, UpdateScheduleExercise,
            UpdateTrainingPlan, UpdateUser, UserDetails, WeekPlanWithSets,
        },
        response_errors::WorkoutError,
        Object,
    },
    model::{
        constants::set_weight, plan::catalog::PlanComparison, Exercise, ExerciseSchedule,
        PlanVersion, User, WeightHistory,
    },
};

fn new_user(nickname: &str) -> CreateUser {
    CreateUser {
        nickname: nickname.to_owned(),
        age: 30,
        height: 180.0,
        weight: 82.0,
        gender: "M".to_owned(),
        weight_goal: Some(78.0),
        password: "correct horse".to_owned(),
        plan_version: None,
    }
}

async fn create_user(app: &TestApp, nickname: &str) -> UserDetails {
    let response = app.post(Object::Users.url(&[])).json(&new_user(nickname)).send().await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn week_plan(app: &TestApp, user_id: i64, week: i64) -> Vec<WeekPlanWithSets> {
    let response = app.get(Object::WeekPlan.url(&[&user_id, &week])).send().await;
    response.assert_status(StatusCode::OK);
    response.json()
}

fn exercise_id(details: &UserDetails, name: &str) -> i64 {
    details
        .exercises
        .iter()
        .find(|e| e.exercise.name == name)
        .map(|e| e.exercise.id)
        .unwrap()
}

fn plan_of(plans: &[WeekPlanWithSets], exercise_id: i64) -> &WeekPlanWithSets {
    plans
        .iter()
        .find(|p| p.week_plan.exercise_id == exercise_id)
        .unwrap()
}

fn workout_error(response: &helpers::TestResponse) -> WorkoutError {
    let error: ServerError<WorkoutError> = response.json();
    error.inner().cloned().unwrap()
}

#[tokio::test]
async fn test_ping() {
    let app = TestApp::new();
    let response = app.get(Object::Ping.url(&[])).send().await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Message>(), Message::new("pong"));
}

#[tokio::test]
async fn test_create_user_seeds_full_cycle() {
    let app = TestApp::new();
    let details = create_user(&app, "seeded").await;

    assert_eq!(details.user.plan_version, PlanVersion::A);
    assert_eq!(details.exercises.len(), 3);
    for exercise in &details.exercises {
        assert_eq!(exercise.exercise.one_rep_max, 100.0);
        assert_eq!(exercise.week_plans.len(), 6);
    }
    assert!(details.weight_history.is_empty());

    let squats = details.exercises.iter().find(|e| e.exercise.name == "squats").unwrap();
    let week_1 = squats.week_plans.iter().find(|p| p.week_plan.week_number == 1).unwrap();
    assert_eq!((week_1.sets[0].reps, week_1.sets[0].weight), (6, 62.5));

    let response = app.get(Object::Users.url(&[])).send().await;
    response.assert_status(StatusCode::OK);
    let users: Vec<UserDetails> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user.nickname, "seeded");
}

#[tokio::test]
async fn test_password_hash_isnt_exposed() {
    let app = TestApp::new();
    let details = create_user(&app, "secretive").await;

    let response = app.get(Object::UserId.url(&[&details.user.id])).send().await;
    response.assert_status(StatusCode::OK);
    let json: serde_json::Value = response.json();
    assert!(json.get("password_hash").is_none());
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = TestApp::new();
    create_user(&app, "taken").await;

    let response = app.post(Object::Users.url(&[])).json(&new_user("taken")).send().await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        workout_error(&response),
        WorkoutError::NicknameTaken {
            nickname: "taken".into()
        }
    );

    let mut user = new_user("other");
    user.gender = "X".into();
    let response = app.post(Object::Users.url(&[])).json(&user).send().await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(workout_error(&response), WorkoutError::InvalidGender { gender: "X".into() });

    let mut user = new_user("other");
    user.plan_version = Some("C".into());
    let response = app.post(Object::Users.url(&[])).json(&user).send().await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let mut user = new_user("other");
    user.age = 0;
    let response = app.post(Object::Users.url(&[])).json(&user).send().await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: ServerError<WorkoutError> = response.json();
    assert!(matches!(error, ServerError::Validation { .. }));

    // Nothing was created by the failed requests
    let users: Vec<UserDetails> = app.get(Object::Users.url(&[])).send().await.json();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_plan_version_query_wins_over_body() {
    let app = TestApp::new();
    let mut user = new_user("versioned");
    user.plan_version = Some("A".into());

    let response = app
        .post(format!("{}?plan_version=B", Object::Users.url(&[])))
        .json(&user)
        .send()
        .await;
    response.assert_status(StatusCode::CREATED);
    let details: UserDetails = response.json();
    assert_eq!(details.user.plan_version, PlanVersion::B);
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new();
    let details = create_user(&app, "lifter").await;

    let response = app
        .post(Object::UserLogin.url(&[]))
        .json(&LoginRequest {
            nickname: "lifter".into(),
            password: "correct horse".into(),
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<LoginResponse>(),
        LoginResponse {
            id: details.user.id,
            nickname: "lifter".into()
        }
    );

    for (nickname, password) in [("lifter", "battery staple"), ("nobody", "correct horse")] {
        let response = app
            .post(Object::UserLogin.url(&[]))
            .json(&LoginRequest {
                nickname: nickname.into(),
                password: password.into(),
            })
            .send()
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(workout_error(&response), WorkoutError::InvalidCredentials);
    }
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::new();
    let details = create_user(&app, "before").await;
    create_user(&app, "occupied").await;
    let user_url = Object::UserId.url(&[&details.user.id]);

    let response = app
        .patch(&user_url)
        .json(&UpdateUser {
            nickname: Some("after".into()),
            weight: Some(79.5),
            password: Some("new password".into()),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    let user: User = response.json();
    assert_eq!(user.nickname, "after");
    assert_eq!(user.weight, 79.5);
    assert_eq!(user.age, 30);

    let response = app
        .post(Object::UserLogin.url(&[]))
        .json(&LoginRequest {
            nickname: "after".into(),
            password: "new password".into(),
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);

    let response = app
        .patch(&user_url)
        .json(&UpdateUser {
            nickname: Some("occupied".into()),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app
        .patch(Object::UserId.url(&[&999]))
        .json(&UpdateUser::default())
        .send()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_clears_weight_goal() {
    let app = TestApp::new();
    let details = create_user(&app, "goalless").await;
    let user_url = Object::UserId.url(&[&details.user.id]);
    assert_eq!(details.user.weight_goal, Some(78.0));

    // Leaving the field out keeps the goal
    let response = app
        .patch(&user_url)
        .json(&UpdateUser {
            age: Some(31),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<User>().weight_goal, Some(78.0));

    let response = app
        .patch(&user_url)
        .json(&UpdateUser {
            weight_goal: Some(None),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<User>().weight_goal, None);

    let response = app
        .patch(&user_url)
        .json(&UpdateUser {
            weight_goal: Some(Some(-5.0)),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_renames_to_same_nickname() {
    let app = TestApp::new();
    let first = create_user(&app, "first").await;
    let second = create_user(&app, "second").await;

    let rename = |user_id: i64| {
        app.patch(Object::UserId.url(&[&user_id]))
            .json(&UpdateUser {
                nickname: Some("contested".into()),
                ..Default::default()
            })
            .send()
    };
    let (a, b) = tokio::join!(rename(first.user.id), rename(second.user.id));

    let mut statuses = vec![a.status, b.status];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);
}

#[tokio::test]
async fn test_update_user_plan_version_regenerates() {
    let app = TestApp::new();
    let details = create_user(&app, "switcher").await;
    let user_id = details.user.id;

    let response = app
        .patch(Object::UserId.url(&[&user_id]))
        .json(&UpdateUser {
            plan_version: Some("B".into()),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<User>().plan_version, PlanVersion::B);

    // Version B week 1 bench is the 6s scheme instead of the ladder
    let plans = week_plan(&app, user_id, 1).await;
    let bench = plan_of(&plans, exercise_id(&details, "bench_press"));
    assert_eq!(bench.sets.len(), 4);
}

#[tokio::test]
async fn test_change_plan_version() {
    let app = TestApp::new();
    let details = create_user(&app, "changer").await;
    let user_id = details.user.id;
    let url = Object::UserPlanVersion.url(&[&user_id]);

    let before = week_plan(&app, user_id, 2).await;

    // Same version keeps the existing plans
    let response = app
        .put(&url)
        .json(&PlanVersionChange {
            plan_version: "A".into(),
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(week_plan(&app, user_id, 2).await, before);

    let response = app
        .put(&url)
        .json(&PlanVersionChange {
            plan_version: "B".into(),
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    let after = week_plan(&app, user_id, 2).await;
    assert_eq!(after.len(), 3);
    assert!(after
        .iter()
        .all(|p| before.iter().all(|b| b.week_plan.id != p.week_plan.id)));
    assert!(after.iter().all(|p| p.sets[0].reps == 4));

    let response = app
        .put(&url)
        .json(&PlanVersionChange {
            plan_version: "Z".into(),
        })
        .send()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        workout_error(&response),
        WorkoutError::InvalidPlanVersion {
            plan_version: "Z".into()
        }
    );
}

#[tokio::test]
async fn test_week_plan_errors() {
    let app = TestApp::new();
    let details = create_user(&app, "weeks").await;

    let response = app.get(Object::WeekPlan.url(&[&details.user.id, &7])).send().await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(workout_error(&response), WorkoutError::InvalidWeekNumber { week_number: 7 });

    let response = app.get(Object::WeekPlan.url(&[&999, &1])).send().await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(workout_error(&response), WorkoutError::UserNotFound { user_id: 999 });
}

#[tokio::test]
async fn test_amrap_progression() {
    let app = TestApp::new();
    let details = create_user(&app, "amrap").await;
    let user_id = details.user.id;
    let squats_id = exercise_id(&details, "squats");

    let week_1 = week_plan(&app, user_id, 1).await;
    let amrap_set = plan_of(&week_1, squats_id)
        .sets
        .iter()
        .find(|s| s.is_amrap)
        .cloned()
        .unwrap();
    assert_eq!(amrap_set.weight, 70.0);

    let response = app
        .post(Object::Amrap.url(&[&user_id, &1]))
        .json(&AmrapResult {
            set_id: amrap_set.id,
            reps_performed: 12,
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    let outcome: AmrapResponse = response.json();
    assert!(outcome.incremented);
    assert_eq!(outcome.progress_weight, 5.0);

    let week_1 = week_plan(&app, user_id, 1).await;
    assert_eq!(plan_of(&week_1, squats_id).sets[3].weight, 70.0);

    for week in 2..=6 {
        let plans = week_plan(&app, user_id, week).await;
        for set in &plan_of(&plans, squats_id).sets {
            assert_eq!(set.weight, set_weight(100.0, set.percentage, 5.0));
        }
    }

    // Regular sets aren't AMRAP sets
    let regular = &plan_of(&week_1, squats_id).sets[0];
    let response = app
        .post(Object::Amrap.url(&[&user_id, &1]))
        .json(&AmrapResult {
            set_id: regular.id,
            reps_performed: 12,
        })
        .send()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .post(Object::Amrap.url(&[&user_id, &1]))
        .json(&AmrapResult {
            set_id: amrap_set.id,
            reps_performed: -1,
        })
        .send()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_exercises() {
    let app = TestApp::new();
    let details = create_user(&app, "exercises").await;
    let other = create_user(&app, "intruder").await;
    let user_id = details.user.id;
    let squats_id = exercise_id(&details, "squats");

    let response = app
        .patch(Object::ExerciseId.url(&[&user_id, &squats_id]))
        .json(&UpdateOneRepMax { one_rep_max: 140.0 })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    let squats: Exercise = response.json();
    assert_eq!((squats.one_rep_max, squats.progress_weight), (140.0, 0.0));

    let week_1 = week_plan(&app, user_id, 1).await;
    assert_eq!(plan_of(&week_1, squats_id).sets[0].weight, 87.5);

    // Other users can't touch the exercise
    let response = app
        .patch(Object::ExerciseId.url(&[&other.user.id, &squats_id]))
        .json(&UpdateOneRepMax { one_rep_max: 10.0 })
        .send()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .delete(Object::ExerciseId.url(&[&user_id, &squats_id]))
        .send()
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        workout_error(&response),
        WorkoutError::ProtectedExercise {
            name: "squats".into()
        }
    );

    let response = app
        .post(Object::Exercises.url(&[&user_id]))
        .json(&vec![
            CreateExercise {
                name: "squats".into(),
                one_rep_max: 500.0,
            },
            CreateExercise {
                name: "overhead_press".into(),
                one_rep_max: 50.0,
            },
        ])
        .send()
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Vec<Exercise> = response.json();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "overhead_press");

    let exercises: Vec<Exercise> = app.get(Object::Exercises.url(&[&user_id])).send().await.json();
    assert_eq!(exercises.len(), 4);

    let response = app
        .delete(Object::ExerciseId.url(&[&user_id, &created[0].id]))
        .send()
        .await;
    response.assert_status(StatusCode::OK);

    let exercises: Vec<Exercise> = app.get(Object::Exercises.url(&[&user_id])).send().await.json();
    assert_eq!(exercises.len(), 3);
}

#[tokio::test]
async fn test_weight_history() {
    let app = TestApp::new();
    let details = create_user(&app, "scale").await;
    let url = Object::WeightHistory.url(&[&details.user.id]);

    for weight in [82.0, 81.2] {
        let response = app.post(&url).json(&RecordWeight { weight }).send().await;
        response.assert_status(StatusCode::CREATED);
    }

    let response = app.post(&url).json(&RecordWeight { weight: -3.0 }).send().await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let history: Vec<WeightHistory> = app.get(&url).send().await.json();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].weight, 81.2);
    assert!(history[0].recorded_at >= history[1].recorded_at);

    let response = app.get(Object::WeightHistory.url(&[&999])).send().await;
    response.assert_status(StatusCode::NOT_FOUND);
}

fn scheduled(exercise_id: i64) -> ScheduleExercise {
    ScheduleExercise {
        exercise_id,
        sets: 3,
        reps: 5,
        weight: 80.0,
        rest_time: Some(120),
        notes: None,
    }
}

#[tokio::test]
async fn test_training_schedule() {
    let app = TestApp::new();
    let details = create_user(&app, "planner").await;
    let other = create_user(&app, "stranger").await;
    let user_id = details.user.id;
    let squats_id = exercise_id(&details, "squats");
    let bench_id = exercise_id(&details, "bench_press");
    let list_url = Object::TrainingSchedule.url(&[&user_id]);

    let date = |s: &str| s.parse::<NaiveDate>().unwrap();

    let response = app
        .post(&list_url)
        .json(&CreateTrainingPlan {
            name: "Stolen".into(),
            scheduled_date: date("2024-05-13"),
            notes: None,
            exercises: vec![scheduled(exercise_id(&other, "squats"))],
        })
        .send()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(matches!(
        workout_error(&response),
        WorkoutError::ExercisesNotOwned { .. }
    ));

    let mut plans = Vec::new();
    for (name, day) in [("Legs", "2024-05-15"), ("Push", "2024-05-13"), ("Today", "")] {
        let scheduled_date = if day.is_empty() {
            Utc::now().date_naive()
        } else {
            date(day)
        };
        let response = app
            .post(&list_url)
            .json(&CreateTrainingPlan {
                name: name.into(),
                scheduled_date,
                notes: Some("warm up first".into()),
                exercises: vec![scheduled(squats_id)],
            })
            .send()
            .await;
        response.assert_status(StatusCode::CREATED);
        plans.push(response.json::<TrainingPlanWithExercises>());
    }
    assert_eq!(plans[0].exercises.len(), 1);

    let listed: Vec<TrainingPlanWithExercises> = app
        .get(format!("{list_url}?from_date=2024-05-01&to_date=2024-05-31"))
        .send()
        .await
        .json();
    let names: Vec<_> = listed.iter().map(|p| p.plan.name.as_str()).collect();
    assert_eq!(names, ["Push", "Legs"]);

    let day: Vec<TrainingPlanWithExercises> = app
        .get(Object::TrainingScheduleDay.url(&[&user_id, &"2024-05-15"]))
        .send()
        .await
        .json();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].plan.name, "Legs");

    let this_week: Vec<TrainingPlanWithExercises> = app
        .get(Object::TrainingScheduleCurrentWeek.url(&[&user_id]))
        .send()
        .await
        .json();
    assert!(this_week.iter().any(|p| p.plan.name == "Today"));

    let legs_id = plans[0].plan.id;
    let legs_url = Object::TrainingScheduleId.url(&[&user_id, &legs_id]);

    let response = app
        .patch(&legs_url)
        .json(&UpdateTrainingPlan {
            name: Some("Heavy legs".into()),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    let updated: TrainingPlanWithExercises = response.json();
    assert_eq!(updated.plan.name, "Heavy legs");
    assert_eq!(updated.plan.notes.as_deref(), Some("warm up first"));

    // Plans are only visible to their owner
    let response = app
        .get(Object::TrainingScheduleId.url(&[&other.user.id, &legs_id]))
        .send()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        workout_error(&response),
        WorkoutError::SchedulePlanNotFound { plan_id: legs_id }
    );

    let response = app
        .post(Object::TrainingScheduleExercises.url(&[&user_id, &legs_id]))
        .json(&scheduled(bench_id))
        .send()
        .await;
    response.assert_status(StatusCode::CREATED);
    let added: ExerciseSchedule = response.json();

    let response = app
        .post(Object::TrainingScheduleExercises.url(&[&user_id, &legs_id]))
        .json(&scheduled(exercise_id(&other, "bench_press")))
        .send()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .patch(Object::TrainingScheduleExerciseId.url(&[&user_id, &legs_id, &added.id]))
        .json(&UpdateScheduleExercise {
            weight: Some(85.0),
            ..Default::default()
        })
        .send()
        .await;
    response.assert_status(StatusCode::OK);
    let patched: ExerciseSchedule = response.json();
    assert_eq!((patched.weight, patched.sets), (85.0, 3));

    // Prescriptions are addressed through the plan they belong to
    let push_id = plans[1].plan.id;
    let response = app
        .delete(Object::TrainingScheduleExerciseId.url(&[&user_id, &push_id, &added.id]))
        .send()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .delete(Object::TrainingScheduleExerciseId.url(&[&user_id, &legs_id, &added.id]))
        .send()
        .await;
    response.assert_status(StatusCode::OK);

    let legs: TrainingPlanWithExercises = app.get(&legs_url).send().await.json();
    assert_eq!(legs.exercises.len(), 1);

    app.delete(&legs_url).send().await.assert_status(StatusCode::OK);
    app.get(&legs_url).send().await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_compare_plans() {
    let app = TestApp::new();
    let response = app.get(Object::ComparePlans.url(&[])).send().await;
    response.assert_status(StatusCode::OK);

    let comparison: PlanComparison = response.json();
    assert_eq!(comparison.plan_a.len(), 6);
    assert_eq!(comparison.plan_b["week_1"]["squats"].len(), 4);
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let app = TestApp::new();
    let details = create_user(&app, "leaving").await;
    let user_url = Object::UserId.url(&[&details.user.id]);

    app.post(Object::WeightHistory.url(&[&details.user.id]))
        .json(&RecordWeight { weight: 80.0 })
        .send()
        .await
        .assert_status(StatusCode::CREATED);

    app.delete(&user_url).send().await.assert_status(StatusCode::OK);
    app.get(&user_url).send().await.assert_status(StatusCode::NOT_FOUND);
    app.delete(&user_url).send().await.assert_status(StatusCode::NOT_FOUND);

    // The nickname is free again
    create_user(&app, "leaving").await;
}
