use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "backend")]
use {crate::api::error::ServerError, http::StatusCode};

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error("{}::{}: {:?}", stringify!($name), stringify!($variant), self)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        #[cfg(feature="backend")]
        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = match &inner {
                    $( $name::$variant { .. } => $variant_code, )*
                };
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(WorkoutError {
    #[code(StatusCode::NOT_FOUND)]
    UserNotFound { user_id: i64 },
    #[code(StatusCode::NOT_FOUND)]
    ExerciseNotFound { exercise_id: i64 },
    #[code(StatusCode::NOT_FOUND)]
    AmrapSetNotFound { set_id: i64 },
    #[code(StatusCode::NOT_FOUND)]
    SchedulePlanNotFound { plan_id: i64 },
    #[code(StatusCode::NOT_FOUND)]
    ExerciseScheduleNotFound { exercise_schedule_id: i64 },
    #[code(StatusCode::BAD_REQUEST)]
    InvalidWeekNumber { week_number: i64 },
    #[code(StatusCode::BAD_REQUEST)]
    InvalidPlanVersion { plan_version: String },
    #[code(StatusCode::BAD_REQUEST)]
    InvalidGender { gender: String },
    #[code(StatusCode::BAD_REQUEST)]
    NicknameTaken { nickname: String },
    #[code(StatusCode::BAD_REQUEST)]
    MissingMandatoryExercises { missing: Vec<String> },
    #[code(StatusCode::BAD_REQUEST)]
    ExercisesNotOwned { exercise_ids: Vec<i64> },
    #[code(StatusCode::UNAUTHORIZED)]
    InvalidCredentials,
    #[code(StatusCode::FORBIDDEN)]
    ProtectedExercise { name: String },
});
