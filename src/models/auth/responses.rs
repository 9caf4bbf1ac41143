use serde::Serialize;
use ts_rs::TS;

use crate::models::{
    auth::requests::{RegisterForm, UpdateProfileForm},
    courses::entities::Course,
    doubts::entities::Doubt,
    enrollments::entities::EnrollmentWithCourse,
    users::entities::{User, UserRole},
};

// 登录页
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginPage {
    pub email: Option<String>,
    pub error: Option<String>,
}

// 注册页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterPage {
    pub form: RegisterForm,
    pub roles: Vec<UserRole>,
    pub error: Option<String>,
}

impl RegisterPage {
    pub fn new(form: RegisterForm, error: Option<String>) -> Self {
        Self {
            form,
            roles: UserRole::all_roles().to_vec(),
            error,
        }
    }
}

// 个人资料页：学生展示选课，教授展示自己的课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ProfilePage {
    pub user: User,
    pub enrollments: Vec<EnrollmentWithCourse>,
    pub courses: Vec<Course>,
    pub doubts: Vec<Doubt>,
    pub form: Option<UpdateProfileForm>,
    pub error: Option<String>,
}
