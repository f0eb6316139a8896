use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use sporeprint::preprocess::image_to_tensor;
use sporeprint::report::top_n;
use sporeprint::{InputSpec, LabelMap, Normalization};

fn bench_preprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Preprocessing");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let spec = InputSpec::default();
    for (name, width, height) in [("small", 96, 96), ("photo", 1024, 768), ("large", 4032, 3024)] {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 60, 30])));
        group.bench_function(name, |b| b.iter(|| image_to_tensor(black_box(&image), &spec)));
    }

    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(1024, 768, Rgb([90, 60, 30])));
    let normalized = spec.with_normalization(Normalization::UnitRange);
    group.bench_function("photo_normalized", |b| {
        b.iter(|| image_to_tensor(black_box(&image), &normalized))
    });

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let labels = LabelMap::new((0..200).map(|i| format!("class_{}", i)).collect());
    let scores: Vec<f32> = (0..200).map(|i| ((i * 37) % 200) as f32 / 200.0).collect();

    c.bench_function("top_5_of_200", |b| b.iter(|| top_n(black_box(&scores), &labels, 5).unwrap()));
}

criterion_group!(benches, bench_preprocessing, bench_ranking);
criterion_main!(benches);
