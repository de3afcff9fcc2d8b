use chrono::{DateTime, Utc};

use crate::models::Course;
use crate::models::course::revive_timestamp;

fn sample(
    id: u64,
    name: &str,
    category: &str,
    description: &str,
    workload: u32,
    date: &str,
) -> Course {
    let at: DateTime<Utc> = revive_timestamp(Some(date)).unwrap_or_else(Utc::now);
    Course {
        id,
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        workload,
        created_at: at,
        updated_at: at,
    }
}

/// Built-in catalog used when neither the cache nor the remote has data.
pub fn sample_courses() -> Vec<Course> {
    vec![
        sample(
            1,
            "Angular para Iniciantes",
            "Frontend",
            "Aprenda os fundamentos do Angular e crie aplicações web modernas.",
            40,
            "2024-01-15",
        ),
        sample(
            2,
            "React Avançado",
            "Frontend",
            "Técnicas avançadas de React, hooks personalizados e otimização de performance.",
            60,
            "2024-01-20",
        ),
        sample(
            3,
            "Node.js e Express",
            "Backend",
            "Desenvolvimento de APIs RESTful com Node.js e Express.",
            50,
            "2024-02-01",
        ),
        sample(
            4,
            "Python para Data Science",
            "Data Science",
            "Análise de dados e machine learning com Python.",
            80,
            "2024-02-10",
        ),
        sample(
            5,
            "DevOps com Docker",
            "DevOps",
            "Containerização e orquestração com Docker e Kubernetes.",
            45,
            "2024-02-15",
        ),
    ]
}
