//! End-to-end rendering tests on small images.

use helio_render::{
    render, Camera, CameraConfig, Material, RenderConfig, Scene, SceneConfig, SkyGradient,
    Sphere, Vec3,
};

fn small_config(workers: usize) -> RenderConfig {
    RenderConfig {
        width: 32,
        height: 16,
        samples_per_pixel: 4,
        max_bounces: 8,
        workers,
        seed: 46557,
        sky: SkyGradient::DAY,
    }
}

fn test_camera(aspect: f32) -> Camera {
    Camera::new(&CameraConfig {
        aspect,
        aperture: 0.0,
        ..CameraConfig::default()
    })
}

#[test]
fn test_output_is_independent_of_worker_count() {
    let scene = Scene::generate(
        &SceneConfig {
            sphere_count: 16,
            ..SceneConfig::default()
        },
        Vec3::new(0.0, 0.7, -1.45),
        46557,
    )
    .unwrap();
    let camera = test_camera(2.0);

    let single = render(&scene, &camera, &small_config(1)).unwrap();
    let multi = render(&scene, &camera, &small_config(3)).unwrap();

    assert_eq!(single.as_bytes(), multi.as_bytes());
}

#[test]
fn test_sphere_darkens_image_center() {
    // A grey sphere dead ahead: the center pixel should differ clearly
    // from a corner pixel showing only sky
    let camera = Camera::new(&CameraConfig {
        position: Vec3::ZERO,
        look_at: Vec3::new(0.0, 0.0, -1.0),
        up: Vec3::Y,
        vfov_degrees: 60.0,
        aspect: 1.0,
        aperture: 0.0,
        focus_distance: 1.0,
    });
    let scene = Scene::new(vec![Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.3,
        Material::Lambertian {
            albedo: Vec3::new(0.2, 0.2, 0.2),
        },
    )]);

    let config = RenderConfig {
        width: 64,
        height: 64,
        samples_per_pixel: 16,
        max_bounces: 8,
        workers: 2,
        seed: 7,
        sky: SkyGradient::DAY,
    };
    let fb = render(&scene, &camera, &config).unwrap();

    let center = fb.pixel(32, 32);
    let corner = fb.pixel(1, 1);
    let distance: i32 = center
        .iter()
        .zip(corner.iter())
        .take(3)
        .map(|(a, b)| (i32::from(*a) - i32::from(*b)).abs())
        .sum();

    assert!(distance > 60, "center {:?} vs corner {:?}", center, corner);
    assert_eq!(center[3], 255);
}

#[test]
fn test_empty_scene_renders_pure_gradient() {
    // With no geometry the top rows must be bluer than the bottom rows
    let scene = Scene::new(Vec::new());
    let camera = test_camera(2.0);
    let fb = render(&scene, &camera, &small_config(2)).unwrap();

    let top = fb.pixel(16, 0);
    let bottom = fb.pixel(16, 15);
    assert!(top[2] >= top[0], "top of frame should lean blue");
    assert!(bottom[0] >= top[0], "bottom of frame should be brighter red");
}

#[test]
fn test_more_samples_reduce_noise() {
    // Variance of a Monte Carlo estimate falls with sample count; measure
    // per-pixel deviation from a high-sample reference render
    let scene = Scene::generate(
        &SceneConfig {
            sphere_count: 12,
            ..SceneConfig::default()
        },
        Vec3::new(0.0, 0.7, -1.45),
        21,
    )
    .unwrap();
    let camera = test_camera(1.0);

    let render_at = |samples: u32, seed: u64| {
        let config = RenderConfig {
            width: 24,
            height: 24,
            samples_per_pixel: samples,
            max_bounces: 8,
            workers: 2,
            seed,
            sky: SkyGradient::DAY,
        };
        render(&scene, &camera, &config).unwrap()
    };

    let reference = render_at(512, 1);
    let mean_error = |samples: u32| {
        let fb = render_at(samples, 2);
        let total: u64 = fb
            .as_bytes()
            .iter()
            .zip(reference.as_bytes())
            .map(|(a, b)| u64::from(a.abs_diff(*b)))
            .sum();
        total as f64 / fb.as_bytes().len() as f64
    };

    let noisy = mean_error(1);
    let smooth = mean_error(64);
    assert!(
        smooth < noisy,
        "64 spp error {smooth:.2} should beat 1 spp error {noisy:.2}"
    );
}

#[test]
fn test_invalid_config_is_rejected_before_rendering() {
    let scene = Scene::new(Vec::new());
    let camera = test_camera(2.0);

    let mut config = small_config(1);
    config.height = 0;
    assert!(render(&scene, &camera, &config).is_err());

    let mut config = small_config(1);
    config.samples_per_pixel = 0;
    assert!(render(&scene, &camera, &config).is_err());
}
