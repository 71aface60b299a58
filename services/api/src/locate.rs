use clap::{Args, ValueEnum};
use solar_siting::config::AppConfig;
use solar_siting::error::AppError;
use solar_siting::siting::{
    BoundingRegion, FeatureCollectionImporter, SiteOutcome, SiteReport, SourceLayer,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LayerArg {
    Landuse,
    Building,
}

impl From<LayerArg> for SourceLayer {
    fn from(value: LayerArg) -> Self {
        match value {
            LayerArg::Landuse => SourceLayer::LandUse,
            LayerArg::Building => SourceLayer::Buildings,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct LocateArgs {
    /// GeoJSON FeatureCollection queried from the map source layer
    #[arg(long)]
    pub(crate) features: PathBuf,
    /// Source layer the features were drawn from
    #[arg(long, value_enum, default_value = "landuse")]
    pub(crate) layer: LayerArg,
    /// Western edge of the viewport (degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) west: f64,
    /// Southern edge of the viewport (degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) south: f64,
    /// Eastern edge of the viewport (degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) east: f64,
    /// Northern edge of the viewport (degrees)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) north: f64,
    /// Print the score of every feature inside the viewport
    #[arg(long)]
    pub(crate) breakdown: bool,
}

pub(crate) fn run_locate(args: LocateArgs) -> Result<(), AppError> {
    let LocateArgs {
        features,
        layer,
        west,
        south,
        east,
        north,
        breakdown,
    } = args;

    let config = AppConfig::load()?;
    let locator = config.siting.locator()?;
    let region = BoundingRegion::new(west, south, east, north)?;
    let layer = SourceLayer::from(layer);

    let candidates = FeatureCollectionImporter::new(layer).import_path(&features)?;
    let report = locator.locate_with_report(&region, &candidates, layer.scoring_mode());

    render_report(layer, &report, breakdown);
    Ok(())
}

fn render_report(layer: SourceLayer, report: &SiteReport, breakdown: bool) {
    println!("Solar siting ({})", layer.label());
    println!(
        "Candidates: {} loaded, {} in viewport, {} above threshold {:.2}",
        report.candidates, report.in_bounds, report.accepted, report.threshold
    );

    match report.outcome() {
        SiteOutcome::Site(site) => println!(
            "\nOptimal site: {:.6}, {:.6} (aggregate score {:.3})",
            site.x, site.y, site.score
        ),
        SiteOutcome::NoSite => println!("\nNo suitable location in the current view"),
    }

    if breakdown {
        println!("\nFeature scores");
        for entry in &report.features {
            let marker = if entry.accepted { "+" } else { "-" };
            println!(
                "{} #{} {} score {:.3}",
                marker,
                entry.index,
                entry.category.as_deref().unwrap_or("(uncategorized)"),
                entry.score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_argument_maps_to_source_layer() {
        assert_eq!(SourceLayer::from(LayerArg::Landuse), SourceLayer::LandUse);
        assert_eq!(SourceLayer::from(LayerArg::Building), SourceLayer::Buildings);
    }
}
