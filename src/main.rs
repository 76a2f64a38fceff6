use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use image::imageops::FilterType;

use annotate_canvas::canvas::{ImageDimensions, image_load};
use annotate_canvas::cli::Cli;
use annotate_canvas::colors::ColorFactory;
use annotate_canvas::config::AppConfig;
use annotate_canvas::editor::{BBoxDrawer, CircleObject, ZOrderRegistry};
use annotate_canvas::render::Scene;
use annotate_canvas::render::image::draw_shapes_on_image;
use annotate_canvas::spread::spread_out_pairs;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if cli.write_config {
        config.save();
    }

    let mut drawer = BBoxDrawer::new(cli.display_size()?, config.bbox.clone());
    drawer.enable();
    drawer.set_ready_callback(|| log::debug!("Image ready"));

    // Queued until the image size is known
    if let Some(rect) = cli.bbox()? {
        drawer.set_box_position(rect);
        drawer.restoring();
    }
    drawer.draw_boxes(cli.boxes()?);

    let (loader, load) = image_load();
    let dims_path = cli.image.clone();
    let dims_task = tokio::task::spawn_blocking(move || ImageDimensions::from_path(&dims_path));
    let decode_path = cli.image.clone();
    let decode_task = tokio::task::spawn_blocking(move || {
        image::open(&decode_path)
            .with_context(|| format!("Failed to open image {}", decode_path.display()))
    });

    loader.resolve(dims_task.await??);
    drawer.attach(load).await?;

    let mapper = *drawer.mapper()?;
    let natural = mapper.natural();
    let (width, height) = (mapper.display_width(), mapper.display_height());

    let objects = cli.objects()?;
    if !objects.is_empty() {
        let spread = spread_out_pairs(&objects, natural.width as f32, width, &config.spread);
        drawer.draw_objects(spread);
    }

    let image = decode_task.await??;
    let mut canvas = image
        .resize_exact(
            width.round().max(1.0) as u32,
            height.round().max(1.0) as u32,
            FilterType::Triangle,
        )
        .to_rgba8();
    draw_shapes_on_image(&mut canvas, &drawer.frame());

    let extents = cli.extents()?;
    if !extents.is_empty() {
        let scene = Rc::new(RefCell::new(Scene::new(width, height)));
        let registry = Rc::new(RefCell::new(ZOrderRegistry::new()));
        let mut colors = ColorFactory::new();
        let mut markers = Vec::with_capacity(extents.len());
        for (i, extent) in extents.into_iter().enumerate() {
            let mut marker = CircleObject::from_extent(
                scene.clone(),
                registry.clone(),
                &mapper,
                extent,
                colors.next_color(),
                format!("{}", i + 1),
                config.circle_object.clone(),
            );
            marker.emphasize();
            markers.push(marker);
        }
        draw_shapes_on_image(&mut canvas, &scene.borrow().display_list());
    }

    canvas
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!("Wrote {}", cli.output.display());
    Ok(())
}
