use anyhow::Context;
use chrono::{Duration, NaiveDate};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    Baseline, Chronotype, FeelingCheckin, HealthSample, LifeEvent, PersonalPreferences,
    ScoreHistoryPoint, ScoringResult, SleepFlexibility, SocialEnergy, ThresholdConfig, WorkSample,
    Zone,
};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn fetch_person(pool: &PgPool, email: &str) -> anyhow::Result<(Uuid, String)> {
    let row = sqlx::query("SELECT id, full_name FROM burnout_engine.people WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?
        .with_context(|| format!("no person with email {email}"))?;
    Ok((row.get("id"), row.get("full_name")))
}

pub async fn fetch_health_sample(
    pool: &PgPool,
    person_id: Uuid,
    day: NaiveDate,
) -> anyhow::Result<Option<HealthSample>> {
    let row = sqlx::query(
        "SELECT sleep_hours, sleep_quality, deep_sleep_hours, rem_sleep_hours, \
         core_sleep_hours, awake_hours, resting_heart_rate, heart_rate_variability, \
         exercise_minutes, recovery_score \
         FROM burnout_engine.health_samples WHERE person_id = $1 AND day = $2",
    )
    .bind(person_id)
    .bind(day)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| HealthSample {
        sleep_hours: row.get("sleep_hours"),
        sleep_quality: row.get("sleep_quality"),
        deep_sleep_hours: row.get("deep_sleep_hours"),
        rem_sleep_hours: row.get("rem_sleep_hours"),
        core_sleep_hours: row.get("core_sleep_hours"),
        awake_hours: row.get("awake_hours"),
        resting_heart_rate: row.get("resting_heart_rate"),
        heart_rate_variability: row.get("heart_rate_variability"),
        exercise_minutes: row.get("exercise_minutes"),
        recovery_score: row.get("recovery_score"),
    }))
}

pub async fn fetch_work_sample(
    pool: &PgPool,
    person_id: Uuid,
    day: NaiveDate,
) -> anyhow::Result<Option<WorkSample>> {
    let row = sqlx::query(
        "SELECT hours_worked, overtime_hours, meetings_attended, meeting_hours, \
         tasks_assigned, tasks_completed, emails_sent \
         FROM burnout_engine.work_samples WHERE person_id = $1 AND day = $2",
    )
    .bind(person_id)
    .bind(day)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| WorkSample {
        hours_worked: row.get("hours_worked"),
        overtime_hours: row.get("overtime_hours"),
        meetings_attended: row.get("meetings_attended"),
        meeting_hours: row.get("meeting_hours"),
        tasks_assigned: row.get("tasks_assigned"),
        tasks_completed: row.get("tasks_completed"),
        emails_sent: row.get("emails_sent"),
    }))
}

pub async fn fetch_baseline(pool: &PgPool, person_id: Uuid) -> anyhow::Result<Option<Baseline>> {
    let row = sqlx::query(
        "SELECT sleep_hours, sleep_quality, hrv, resting_heart_rate, work_hours \
         FROM burnout_engine.baselines WHERE person_id = $1",
    )
    .bind(person_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Baseline {
        sleep_hours: row.get("sleep_hours"),
        sleep_quality: row.get("sleep_quality"),
        hrv: row.get("hrv"),
        resting_heart_rate: row.get("resting_heart_rate"),
        work_hours: row.get("work_hours"),
    }))
}

pub async fn fetch_preferences(
    pool: &PgPool,
    person_id: Uuid,
) -> anyhow::Result<Option<PersonalPreferences>> {
    let row = sqlx::query(
        "SELECT ideal_sleep_hours, ideal_work_hours, ideal_exercise_minutes, \
         weight_sleep, weight_stress, weight_workload, weight_recovery, \
         chronotype, social_energy, sleep_flexibility \
         FROM burnout_engine.personal_preferences WHERE person_id = $1",
    )
    .bind(person_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| PersonalPreferences {
        ideal_sleep_hours: row.get("ideal_sleep_hours"),
        ideal_work_hours: row.get("ideal_work_hours"),
        ideal_exercise_minutes: row.get("ideal_exercise_minutes"),
        weight_sleep: row.get("weight_sleep"),
        weight_stress: row.get("weight_stress"),
        weight_workload: row.get("weight_workload"),
        weight_recovery: row.get("weight_recovery"),
        chronotype: row
            .get::<Option<String>, _>("chronotype")
            .as_deref()
            .and_then(Chronotype::parse),
        social_energy: row
            .get::<Option<String>, _>("social_energy")
            .as_deref()
            .and_then(SocialEnergy::parse),
        sleep_flexibility: row
            .get::<Option<String>, _>("sleep_flexibility")
            .as_deref()
            .and_then(SleepFlexibility::parse),
    }))
}

pub async fn fetch_life_events(pool: &PgPool, person_id: Uuid) -> anyhow::Result<Vec<LifeEvent>> {
    let rows = sqlx::query(
        "SELECT label, start_date, end_date, sleep_adjustment_pct, work_adjustment_pct, \
         exercise_adjustment_pct, stress_tolerance_adjustment_pct \
         FROM burnout_engine.life_events WHERE person_id = $1",
    )
    .bind(person_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| LifeEvent {
            label: row.get("label"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            sleep_adjustment_pct: row.get("sleep_adjustment_pct"),
            work_adjustment_pct: row.get("work_adjustment_pct"),
            exercise_adjustment_pct: row.get("exercise_adjustment_pct"),
            stress_tolerance_adjustment_pct: row.get("stress_tolerance_adjustment_pct"),
        })
        .collect())
}

pub async fn fetch_checkins(
    pool: &PgPool,
    person_id: Uuid,
    since: NaiveDate,
) -> anyhow::Result<Vec<FeelingCheckin>> {
    let rows = sqlx::query(
        "SELECT recorded_at, overall_feeling, stress_level, algorithm_score \
         FROM burnout_engine.feeling_checkins \
         WHERE person_id = $1 AND recorded_at >= $2 \
         ORDER BY recorded_at DESC",
    )
    .bind(person_id)
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| FeelingCheckin {
            recorded_at: row.get("recorded_at"),
            overall_feeling: row.get("overall_feeling"),
            stress_level: row.get("stress_level"),
            algorithm_score: row.get("algorithm_score"),
        })
        .collect())
}

/// Person-level row wins over the global row (person_id NULL); the built-in
/// defaults apply when neither exists.
pub async fn fetch_threshold_config(
    pool: &PgPool,
    person_id: Uuid,
) -> anyhow::Result<ThresholdConfig> {
    let row = sqlx::query(
        "SELECT red_threshold, green_threshold, interaction_high, interaction_critical, \
         interaction_effects_enabled, weekend_adjustment_enabled, \
         calibration_window_days, calibration_min_checkins \
         FROM burnout_engine.threshold_configs \
         WHERE person_id = $1 OR person_id IS NULL \
         ORDER BY person_id NULLS LAST \
         LIMIT 1",
    )
    .bind(person_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map_or_else(ThresholdConfig::default, |row| ThresholdConfig {
        red_threshold: row.get("red_threshold"),
        green_threshold: row.get("green_threshold"),
        interaction_high: row.get("interaction_high"),
        interaction_critical: row.get("interaction_critical"),
        interaction_effects_enabled: row.get("interaction_effects_enabled"),
        weekend_adjustment_enabled: row.get("weekend_adjustment_enabled"),
        calibration_window_days: i64::from(row.get::<i32, _>("calibration_window_days")),
        calibration_min_checkins: row.get::<i32, _>("calibration_min_checkins").max(0) as usize,
    }))
}

pub async fn fetch_score_history(
    pool: &PgPool,
    person_id: Uuid,
    up_to: NaiveDate,
) -> anyhow::Result<Vec<ScoreHistoryPoint>> {
    let rows = sqlx::query(
        "SELECT day, burnout_score, readiness_score, zone \
         FROM burnout_engine.scoring_results \
         WHERE person_id = $1 AND day < $2 \
         ORDER BY day ASC",
    )
    .bind(person_id)
    .bind(up_to)
    .fetch_all(pool)
    .await?;

    let mut history = Vec::with_capacity(rows.len());
    for row in rows {
        let zone: String = row.get("zone");
        history.push(ScoreHistoryPoint {
            day: row.get("day"),
            burnout_score: row.get("burnout_score"),
            readiness_score: row.get("readiness_score"),
            zone: Zone::parse(&zone).with_context(|| format!("unknown zone value {zone}"))?,
        });
    }
    Ok(history)
}

pub async fn fetch_latest_burnout_score(
    pool: &PgPool,
    person_id: Uuid,
) -> anyhow::Result<Option<f64>> {
    let row = sqlx::query(
        "SELECT burnout_score FROM burnout_engine.scoring_results \
         WHERE person_id = $1 ORDER BY day DESC LIMIT 1",
    )
    .bind(person_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|row| row.get("burnout_score")))
}

pub async fn fetch_latest_result(
    pool: &PgPool,
    person_id: Uuid,
) -> anyhow::Result<Option<ScoringResult>> {
    let row = sqlx::query(
        "SELECT person_id, day, burnout_score, readiness_score, zone, previous_zone, \
         zone_changed, explanation \
         FROM burnout_engine.scoring_results \
         WHERE person_id = $1 ORDER BY day DESC LIMIT 1",
    )
    .bind(person_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let zone: String = row.get("zone");
    let previous_zone: Option<String> = row.get("previous_zone");
    let explanation: serde_json::Value = row.get("explanation");
    Ok(Some(ScoringResult {
        person_id: row.get("person_id"),
        day: row.get("day"),
        burnout_score: row.get("burnout_score"),
        readiness_score: row.get("readiness_score"),
        zone: Zone::parse(&zone).with_context(|| format!("unknown zone value {zone}"))?,
        previous_zone: previous_zone.as_deref().and_then(Zone::parse),
        zone_changed: row.get("zone_changed"),
        explanation: serde_json::from_value(explanation)
            .context("failed to deserialize stored explanation")?,
    }))
}

pub async fn insert_checkin(
    pool: &PgPool,
    person_id: Uuid,
    day: NaiveDate,
    feeling: i32,
    stress: i32,
    algorithm_score: Option<f64>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO burnout_engine.feeling_checkins
        (id, person_id, recorded_at, overall_feeling, stress_level, algorithm_score)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(person_id)
    .bind(day)
    .bind(feeling)
    .bind(stress)
    .bind(algorithm_score)
    .execute(pool)
    .await?;
    Ok(())
}

/// Idempotent upsert keyed by (person, date); re-running a day overwrites
/// the row rather than duplicating it.
pub async fn upsert_scoring_result(pool: &PgPool, result: &ScoringResult) -> anyhow::Result<()> {
    let explanation =
        serde_json::to_value(&result.explanation).context("failed to serialize explanation")?;
    debug!(person = %result.person_id, day = %result.day, zone = result.zone.as_str(), "upserting scoring result");

    sqlx::query(
        r#"
        INSERT INTO burnout_engine.scoring_results
        (id, person_id, day, burnout_score, readiness_score, zone, previous_zone, zone_changed, explanation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (person_id, day) DO UPDATE
        SET burnout_score = EXCLUDED.burnout_score,
            readiness_score = EXCLUDED.readiness_score,
            zone = EXCLUDED.zone,
            previous_zone = EXCLUDED.previous_zone,
            zone_changed = EXCLUDED.zone_changed,
            explanation = EXCLUDED.explanation
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(result.person_id)
    .bind(result.day)
    .bind(result.burnout_score)
    .bind(result.readiness_score)
    .bind(result.zone.as_str())
    .bind(result.previous_zone.map(Zone::as_str))
    .bind(result.zone_changed)
    .bind(explanation)
    .execute(pool)
    .await?;
    Ok(())
}

async fn upsert_person(pool: &PgPool, full_name: &str, email: &str) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query(
        r#"
        INSERT INTO burnout_engine.people (id, full_name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET full_name = EXCLUDED.full_name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(full_name)
    .bind(email)
    .fetch_one(pool)
    .await?
    .get("id");
    Ok(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SampleKind {
    Health,
    Work,
}

pub async fn import_csv(
    pool: &PgPool,
    csv_path: &std::path::Path,
    kind: SampleKind,
) -> anyhow::Result<usize> {
    match kind {
        SampleKind::Health => import_health_csv(pool, csv_path).await,
        SampleKind::Work => import_work_csv(pool, csv_path).await,
    }
}

async fn import_health_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        full_name: String,
        email: String,
        day: NaiveDate,
        sleep_hours: Option<f64>,
        sleep_quality: Option<f64>,
        deep_sleep_hours: Option<f64>,
        rem_sleep_hours: Option<f64>,
        core_sleep_hours: Option<f64>,
        awake_hours: Option<f64>,
        resting_heart_rate: Option<f64>,
        heart_rate_variability: Option<f64>,
        exercise_minutes: Option<f64>,
        recovery_score: Option<f64>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let person_id = upsert_person(pool, &row.full_name, &row.email).await?;
        let outcome = sqlx::query(
            r#"
            INSERT INTO burnout_engine.health_samples
            (id, person_id, day, sleep_hours, sleep_quality, deep_sleep_hours,
             rem_sleep_hours, core_sleep_hours, awake_hours, resting_heart_rate,
             heart_rate_variability, exercise_minutes, recovery_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (person_id, day) DO UPDATE
            SET sleep_hours = EXCLUDED.sleep_hours,
                sleep_quality = EXCLUDED.sleep_quality,
                deep_sleep_hours = EXCLUDED.deep_sleep_hours,
                rem_sleep_hours = EXCLUDED.rem_sleep_hours,
                core_sleep_hours = EXCLUDED.core_sleep_hours,
                awake_hours = EXCLUDED.awake_hours,
                resting_heart_rate = EXCLUDED.resting_heart_rate,
                heart_rate_variability = EXCLUDED.heart_rate_variability,
                exercise_minutes = EXCLUDED.exercise_minutes,
                recovery_score = EXCLUDED.recovery_score
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(person_id)
        .bind(row.day)
        .bind(row.sleep_hours)
        .bind(row.sleep_quality)
        .bind(row.deep_sleep_hours)
        .bind(row.rem_sleep_hours)
        .bind(row.core_sleep_hours)
        .bind(row.awake_hours)
        .bind(row.resting_heart_rate)
        .bind(row.heart_rate_variability)
        .bind(row.exercise_minutes)
        .bind(row.recovery_score)
        .execute(pool)
        .await?;

        if outcome.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

async fn import_work_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        full_name: String,
        email: String,
        day: NaiveDate,
        hours_worked: Option<f64>,
        overtime_hours: Option<f64>,
        meetings_attended: Option<i32>,
        meeting_hours: Option<f64>,
        tasks_assigned: Option<i32>,
        tasks_completed: Option<i32>,
        emails_sent: Option<i32>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let person_id = upsert_person(pool, &row.full_name, &row.email).await?;
        let outcome = sqlx::query(
            r#"
            INSERT INTO burnout_engine.work_samples
            (id, person_id, day, hours_worked, overtime_hours, meetings_attended,
             meeting_hours, tasks_assigned, tasks_completed, emails_sent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (person_id, day) DO UPDATE
            SET hours_worked = EXCLUDED.hours_worked,
                overtime_hours = EXCLUDED.overtime_hours,
                meetings_attended = EXCLUDED.meetings_attended,
                meeting_hours = EXCLUDED.meeting_hours,
                tasks_assigned = EXCLUDED.tasks_assigned,
                tasks_completed = EXCLUDED.tasks_completed,
                emails_sent = EXCLUDED.emails_sent
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(person_id)
        .bind(row.day)
        .bind(row.hours_worked)
        .bind(row.overtime_hours)
        .bind(row.meetings_attended)
        .bind(row.meeting_hours)
        .bind(row.tasks_assigned)
        .bind(row.tasks_completed)
        .bind(row.emails_sent)
        .execute(pool)
        .await?;

        if outcome.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

pub async fn seed(pool: &PgPool, today: NaiveDate) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO burnout_engine.threshold_configs (id, person_id)
        VALUES ($1, NULL)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(Uuid::parse_str("7f1c9a52-08d4-4f4e-9a36-5f4af1f4b001")?)
    .execute(pool)
    .await?;

    let maya = upsert_person(pool, "Maya Chen", "maya.chen@example.com").await?;
    let tomas = upsert_person(pool, "Tomás Rivera", "tomas.rivera@example.com").await?;
    let priya = upsert_person(pool, "Priya Nair", "priya.nair@example.com").await?;

    for (person_id, sleep, quality, hrv, rhr, work) in [
        (maya, 7.5, 75.0, 52.0, 62.0, 8.0),
        (tomas, 7.0, 70.0, 45.0, 65.0, 8.0),
        (priya, 6.5, 68.0, 40.0, 68.0, 9.0),
    ] {
        sqlx::query(
            r#"
            INSERT INTO burnout_engine.baselines
            (person_id, sleep_hours, sleep_quality, hrv, resting_heart_rate, work_hours)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (person_id) DO UPDATE
            SET sleep_hours = EXCLUDED.sleep_hours,
                sleep_quality = EXCLUDED.sleep_quality,
                hrv = EXCLUDED.hrv,
                resting_heart_rate = EXCLUDED.resting_heart_rate,
                work_hours = EXCLUDED.work_hours
            "#,
        )
        .bind(person_id)
        .bind(sleep)
        .bind(quality)
        .bind(hrv)
        .bind(rhr)
        .bind(work)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO burnout_engine.personal_preferences
        (person_id, ideal_sleep_hours, ideal_work_hours, ideal_exercise_minutes,
         weight_sleep, weight_stress, weight_workload, weight_recovery,
         chronotype, social_energy, sleep_flexibility)
        VALUES ($1, 8.0, 7.5, 40.0, 2.0, 1.0, 1.0, 1.0, 'night_owl', 'introvert', 'flexible')
        ON CONFLICT (person_id) DO NOTHING
        "#,
    )
    .bind(maya)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO burnout_engine.life_events
        (id, person_id, label, start_date, end_date,
         sleep_adjustment_pct, work_adjustment_pct, exercise_adjustment_pct,
         stress_tolerance_adjustment_pct)
        VALUES ($1, $2, 'new parent', $3, NULL, -15.0, -20.0, -50.0, -20.0)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(Uuid::parse_str("b2f6f0a8-6c38-45d2-93a1-2f2f8f5de002")?)
    .bind(maya)
    .bind(today - Duration::days(60))
    .execute(pool)
    .await?;

    // Two weeks of samples per person. Priya trends into overload while the
    // others hover near baseline.
    for offset in 0..14i64 {
        let day = today - Duration::days(13 - offset);
        let wobble = (offset % 3) as f64;
        for (person_id, sleep, hrv, hours, overtime) in [
            (maya, 6.8 - 0.2 * wobble, 48.0 - wobble, 7.5, 0.0),
            (tomas, 7.1 - 0.1 * wobble, 45.0, 8.0 + 0.5 * wobble, 0.0),
            (
                priya,
                6.0 - 0.2 * (offset as f64) / 3.0,
                38.0 - (offset as f64) / 2.0,
                9.5 + (offset as f64) / 4.0,
                (offset as f64) / 6.0,
            ),
        ] {
            sqlx::query(
                r#"
                INSERT INTO burnout_engine.health_samples
                (id, person_id, day, sleep_hours, sleep_quality, deep_sleep_hours,
                 resting_heart_rate, heart_rate_variability, exercise_minutes, recovery_score)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (person_id, day) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(person_id)
            .bind(day)
            .bind(sleep)
            .bind(68.0 + wobble)
            .bind(sleep * 0.2)
            .bind(64.0 + wobble)
            .bind(hrv)
            .bind(25.0 + 5.0 * wobble)
            .bind(70.0 - 2.0 * wobble)
            .execute(pool)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO burnout_engine.work_samples
                (id, person_id, day, hours_worked, overtime_hours, meetings_attended,
                 meeting_hours, tasks_assigned, tasks_completed, emails_sent)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (person_id, day) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(person_id)
            .bind(day)
            .bind(hours)
            .bind(overtime)
            .bind(3 + (offset % 2) as i32)
            .bind(2.5 + 0.5 * wobble)
            .bind(5)
            .bind(4 + (offset % 2) as i32)
            .bind(30 + 5 * (offset % 4) as i32)
            .execute(pool)
            .await?;
        }
    }

    let checkin_ids = [
        "c1a40d10-57a5-49cf-93f4-0d3d2b1ce101",
        "c1a40d10-57a5-49cf-93f4-0d3d2b1ce102",
        "c1a40d10-57a5-49cf-93f4-0d3d2b1ce103",
    ];
    for ((days_ago, feeling, stress), id) in
        [(8i64, 3, 3), (5, 2, 4), (2, 2, 4)].into_iter().zip(checkin_ids)
    {
        sqlx::query(
            r#"
            INSERT INTO burnout_engine.feeling_checkins
            (id, person_id, recorded_at, overall_feeling, stress_level, algorithm_score)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(Uuid::parse_str(id)?)
        .bind(priya)
        .bind(today - Duration::days(days_ago))
        .bind(feeling)
        .bind(stress)
        .bind(Some(55.0))
        .execute(pool)
        .await?;
    }

    Ok(())
}
