use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::courses::entities::Course;

// 学生选课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    // 学习进度，取值 [0, 1]
    pub progress: f64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

/// 进度写入前统一截断到 [0, 1]
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// 打开第 `position` 节课（从 1 开始）后的进度，只增不减
pub fn advance_progress(current: f64, position: usize, total: usize) -> f64 {
    if total == 0 {
        return clamp_progress(current);
    }
    let reached = position as f64 / total as f64;
    clamp_progress(current.max(reached))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(1.7), 1.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(0.25), 0.25);
    }

    #[test]
    fn test_advance_progress_never_goes_back() {
        assert_eq!(advance_progress(0.0, 1, 4), 0.25);
        assert_eq!(advance_progress(0.75, 1, 4), 0.75);
        assert_eq!(advance_progress(0.5, 4, 4), 1.0);
        assert_eq!(advance_progress(0.3, 1, 0), 0.3);
    }
}
