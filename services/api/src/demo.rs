use std::sync::Arc;

use clap::Args;
use uuid::Uuid;

use creator_match::error::AppError;
use creator_match::workflows::marketplace::applications::{
    ApplicationServiceError, ApplicationStatus, CampaignApplicationService,
};
use creator_match::workflows::marketplace::assistant::{KeywordInterpreter, TemplateExplainer};
use creator_match::workflows::marketplace::{
    trust, BrandId, Campaign, CampaignId, CampaignStatus, EngagementStats, InfluencerId,
    InfluencerProfile, RecommendationEngine, SearchService,
};

use crate::infra::{InMemoryCampaignRepository, InMemoryInfluencerRepository};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Natural-language query used for the search portion of the demo
    #[arg(long, default_value = "micro influencers in beauty with authentic audience")]
    pub(crate) query: String,
    /// Skip the application lifecycle portion of the demo
    #[arg(long)]
    pub(crate) skip_applications: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Follower count
    #[arg(long)]
    pub(crate) followers: u64,
    /// Average likes per post
    #[arg(long)]
    pub(crate) avg_likes: u64,
    /// Average comments per post
    #[arg(long)]
    pub(crate) avg_comments: u64,
    /// Engagement rate as a fraction (e.g. 0.03)
    #[arg(long)]
    pub(crate) engagement_rate: f64,
}

#[derive(Args, Debug)]
pub(crate) struct InterpretArgs {
    /// Natural-language search query
    pub(crate) query: String,
}

/// Handles into the seeded data that the demo and server wiring reuse.
pub(crate) struct SeededMarketplace {
    pub(crate) beauty_campaign: Campaign,
    pub(crate) fitness_campaign: Campaign,
    pub(crate) yoga_priya: InfluencerId,
    pub(crate) fit_mike: InfluencerId,
}

fn creator(
    name: &str,
    categories: &[&str],
    platform_handles: (Option<&str>, Option<&str>, Option<&str>),
    followers: u64,
    avg_likes: u64,
    avg_comments: u64,
    engagement_rate: f64,
    location: &str,
) -> InfluencerProfile {
    let (instagram, tiktok, youtube) = platform_handles;
    let mut profile = InfluencerProfile {
        id: InfluencerId(Uuid::new_v4()),
        display_name: name.to_string(),
        bio: None,
        avatar_url: Some(format!(
            "https://cdn.example.com/avatars/{}.png",
            name.to_lowercase()
        )),
        categories: categories.iter().map(|category| category.to_string()).collect(),
        instagram_handle: instagram.map(str::to_string),
        tiktok_handle: tiktok.map(str::to_string),
        youtube_handle: youtube.map(str::to_string),
        follower_count: followers,
        engagement_rate,
        avg_likes,
        avg_comments,
        authenticity_score: 0.0,
        fake_follower_pct: 0.0,
        location: Some(location.to_string()),
        is_verified: followers > 500_000,
    };
    profile.refresh_trust();
    profile
}

/// Populate the in-memory marketplace with creators on both sides of every
/// interesting threshold, plus two active campaigns.
pub(crate) fn seed_marketplace(
    influencers: &InMemoryInfluencerRepository,
    campaigns: &InMemoryCampaignRepository,
) -> SeededMarketplace {
    let sophia = creator(
        "Sophia Style",
        &["fashion", "lifestyle"],
        (Some("sophia.style"), None, None),
        120_000,
        3_600,
        95,
        0.032,
        "Los Angeles, US",
    );
    let mike = creator(
        "FitWithMike",
        &["fitness", "lifestyle"],
        (None, None, Some("fitwithmike")),
        48_000,
        1_900,
        60,
        0.041,
        "New York, US",
    );
    let jess = creator(
        "GlowByJess",
        &["beauty", "fashion"],
        (None, Some("glowbyjess"), None),
        65_000,
        2_200,
        50,
        0.036,
        "London, UK",
    );
    let priya = creator(
        "YogaWithPriya",
        &["fitness", "lifestyle"],
        (Some("yogawithpriya"), None, None),
        22_000,
        800,
        28,
        0.038,
        "Mumbai, IN",
    );
    let tara = creator(
        "TechTara",
        &["tech", "gaming"],
        (None, None, Some("techtara")),
        310_000,
        4_000,
        900,
        0.014,
        "Berlin, DE",
    );
    // Engagement pattern straight out of a bot farm; lands well under the
    // recommendation trust floor.
    let dan = creator(
        "StreetEatsDan",
        &["food", "travel"],
        (None, Some("streeteatsdan"), None),
        9_500,
        1_400,
        300,
        0.19,
        "New York, US",
    );
    let luna = creator(
        "MakeupByLuna",
        &["beauty", "lifestyle"],
        (Some("makeupbyluna"), None, None),
        780_000,
        17_000,
        400,
        0.022,
        "Los Angeles, US",
    );
    let anya = creator(
        "WanderlustAnya",
        &["travel", "lifestyle"],
        (Some("wanderlust.anya"), None, None),
        1_400_000,
        20_000,
        450,
        0.015,
        "Sydney, AU",
    );

    let yoga_priya = priya.id;
    let fit_mike = mike.id;
    for profile in [sophia, mike, jess, priya, tara, dan, luna, anya] {
        influencers.insert(profile);
    }

    let beauty_campaign = Campaign {
        id: CampaignId(Uuid::new_v4()),
        brand_id: BrandId(Uuid::new_v4()),
        title: "Summer Glow Collection Launch".to_string(),
        category: Some("beauty".to_string()),
        min_followers: Some(10_000),
        min_engagement_rate: Some(0.02),
        status: CampaignStatus::Active,
        created_at: chrono::Utc::now(),
    };
    let fitness_campaign = Campaign {
        id: CampaignId(Uuid::new_v4()),
        brand_id: BrandId(Uuid::new_v4()),
        title: "30-Day Fitness Challenge".to_string(),
        category: Some("fitness".to_string()),
        min_followers: Some(20_000),
        min_engagement_rate: Some(0.03),
        status: CampaignStatus::Active,
        created_at: chrono::Utc::now(),
    };
    campaigns.insert(beauty_campaign.clone());
    campaigns.insert(fitness_campaign.clone());

    SeededMarketplace {
        beauty_campaign,
        fitness_campaign,
        yoga_priya,
        fit_mike,
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let influencers = Arc::new(InMemoryInfluencerRepository::default());
    let campaigns = Arc::new(InMemoryCampaignRepository::default());
    let applications = Arc::new(crate::infra::InMemoryApplicationRepository::default());
    let seeded = seed_marketplace(&influencers, &campaigns);

    let search = SearchService::new(influencers.clone(), Arc::new(KeywordInterpreter));
    let engine = RecommendationEngine::new(
        campaigns.clone(),
        influencers.clone(),
        Arc::new(TemplateExplainer),
    );
    let workflow =
        CampaignApplicationService::new(campaigns.clone(), influencers.clone(), applications);

    println!("Creator match demo");
    println!(
        "Seeded {} creators and {} campaigns\n",
        influencers.len(),
        campaigns.len()
    );

    println!("Natural search: \"{}\"", args.query);
    let outcome = search.natural_search(&args.query, 5).await?;
    println!(
        "Interpreted filters: {}",
        serde_json::to_string(&outcome.interpreted_filters)?
    );
    println!("{} match(es)", outcome.total);
    for profile in &outcome.results {
        println!(
            "- {} | {} followers | engagement {:.1}% | authenticity {:.1}",
            profile.display_name,
            profile.follower_count,
            profile.engagement_rate * 100.0,
            profile.authenticity_score
        );
    }

    println!("\nRecommendations for '{}'", seeded.beauty_campaign.title);
    let recommendation = engine.recommend(&seeded.beauty_campaign.id).await?;
    for profile in &recommendation.recommendations {
        println!(
            "- {} | engagement {:.1}% | authenticity {:.1}",
            profile.display_name,
            profile.engagement_rate * 100.0,
            profile.authenticity_score
        );
    }
    println!("Reasoning: {}", recommendation.reasoning);

    if args.skip_applications {
        return Ok(());
    }

    println!("\nApplication workflow for '{}'", seeded.fitness_campaign.title);
    let campaign_id = seeded.fitness_campaign.id;
    let brand_id = seeded.fitness_campaign.brand_id;

    let accepted = workflow.apply(
        &campaign_id,
        &seeded.yoga_priya,
        Some("Daily flows, loyal audience".to_string()),
    )?;
    workflow.apply(&campaign_id, &seeded.fit_mike, None)?;

    let inbox = workflow.list_for_campaign(&campaign_id, &brand_id)?;
    println!("{} application(s) received:", inbox.len());
    for view in &inbox {
        println!("- {} ({})", view.influencer_name, view.status.label());
    }

    workflow.update_status(
        &campaign_id,
        &accepted.id,
        &brand_id,
        ApplicationStatus::Accepted,
    )?;
    println!("Accepted YogaWithPriya");

    match workflow.apply(&campaign_id, &seeded.yoga_priya, None) {
        Err(ApplicationServiceError::AlreadyApplied) => {
            println!("Second application from YogaWithPriya rejected as a duplicate");
        }
        Ok(_) => println!("Unexpected: duplicate application was accepted"),
        Err(other) => return Err(other.into()),
    }

    let dashboard = workflow.list_for_influencer(&seeded.yoga_priya)?;
    println!("\nYogaWithPriya's dashboard:");
    for view in &dashboard {
        println!("- {} -> {}", view.campaign_title, view.status.label());
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let stats = EngagementStats {
        follower_count: args.followers,
        avg_likes: args.avg_likes,
        avg_comments: args.avg_comments,
        engagement_rate: args.engagement_rate,
    };

    let score = trust::score(&stats);
    println!("Authenticity score: {:.1}", score.authenticity_score);
    println!("Estimated fake followers: {:.1}%", score.fake_follower_pct);
    Ok(())
}

pub(crate) fn run_interpret(args: InterpretArgs) -> Result<(), AppError> {
    let filters = KeywordInterpreter::interpret_query(&args.query);
    println!("{}", serde_json::to_string_pretty(&filters)?);
    Ok(())
}
