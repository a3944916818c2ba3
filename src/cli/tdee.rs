use anyhow::Result;
use clap::Args;
use planner::{daily_targets, macro_targets, ActivityLevel, Gender, Goal};

#[derive(Args)]
pub struct TdeeArgs {
    /// Biological sex: male or female
    #[arg(long)]
    pub gender: Gender,

    /// Age in years
    #[arg(long)]
    pub age: u32,

    /// Height in centimeters
    #[arg(long)]
    pub height_cm: u32,

    /// Weight in kilograms
    #[arg(long)]
    pub weight_kg: f64,

    /// Activity level: desk, moderate or athlete
    #[arg(long, default_value = "moderate")]
    pub activity: ActivityLevel,

    /// Goal: lose-weight, maintain or gain-muscle
    #[arg(long, default_value = "maintain")]
    pub goal: Goal,
}

pub fn run(args: TdeeArgs) -> Result<()> {
    let targets = daily_targets(
        args.gender,
        args.age,
        args.height_cm,
        args.weight_kg,
        args.activity,
        args.goal,
    );
    let macros = macro_targets(targets.kcal, args.goal, targets.protein_g);

    println!("Objektiv ditor: {} kcal", targets.kcal);
    println!(
        "Makro: P {} g / C {} g / Y {} g",
        macros.protein_g, macros.carbs_g, macros.fat_g
    );
    println!();
    println!("Për planin javor: javore plan --kcal {}", targets.kcal);
    Ok(())
}
