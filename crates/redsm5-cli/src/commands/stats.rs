//! Corpus statistics command

use crate::console::CliConsole;
use colored::*;
use redsm5_core::dataset::CorpusStatistics;
use redsm5_core::error::Redsm5Result;
use std::path::Path;

pub async fn run(posts: &Path, annotations: &Path, json: bool) -> Redsm5Result<()> {
    let stats = CorpusStatistics::from_files(posts, annotations)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let console = CliConsole::new(true);
    console.print_header("Corpus Statistics");
    console.print_field("Total number of posts", stats.posts);
    console.print_field("Total number of explanations", stats.explanations);
    console.print_field(
        "Avg. explanations per post",
        format!("{:.2}", stats.avg_explanations_per_post),
    );
    console.print_field(
        "Avg. symptoms per post (status=1)",
        format!("{:.2}", stats.avg_symptoms_per_post),
    );
    console.print_field("Hard negatives", stats.hard_negatives);
    console.print_field("Avg. post length (words)", format!("{:.2}", stats.avg_length_words));
    console.print_field("Median post length (words)", stats.median_length_words);
    console.print_field(
        "Std. dev. post length (words)",
        format!("{:.2}", stats.std_dev_length_words),
    );
    console.print_field("Min. post length (words)", stats.min_length_words);
    console.print_field("Max. post length (words)", stats.max_length_words);

    console.print_header("Posts per Symptom (status=1)");
    for count in &stats.symptom_distribution {
        println!("  {:<20} {}", count.symptom.to_string().magenta(), count.posts);
    }

    Ok(())
}
