use chrono::Utc;
use fitness_client::retry::RetryPolicy;
use fitness_client::{FitnessStore, config::Config, http_client::ReqwestFitnessStore};
use fitness_core::{Period, summarize};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Example: expects FITNESS_API_TOKEN in env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let store = ReqwestFitnessStore::from_config(&cfg);

    // the clock stays out here; the core only sees the reference date
    let today = Utc::now().date_naive();
    let retry = RetryPolicy::default();
    let records = retry.run(|| store.get_activities()).await?;
    let summary = summarize(&records, Period::Weekly, today);
    println!(
        "Last 7 days: {} steps, {:.2} km, {} kcal",
        summary.total_steps,
        summary.total_distance_km_rounded(),
        summary.total_calories
    );

    for goal in store.get_goal_snapshots().await? {
        println!(
            "Goal {:?} {:?}: {:.0}% {}",
            goal.goal_type,
            goal.category,
            goal.percent_complete(),
            if goal.completed() { "(done)" } else { "" }
        );
    }
    Ok(())
}
