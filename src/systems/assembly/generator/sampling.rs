// seeded sampling helpers
// everything here is pure: same inputs, same output, no hidden state

use bevy::math::Vec3;

/// Hash-based scalar draw in `[min, max)`.
/// `min + (max - min) * frac(sin(seed * 12.9898 + 78.233) * 43758.5453123)`
/// Evaluated in f64 so nearby seeds stay distinct after the large multiply.
pub fn random(min: f32, max: f32, seed: f64) -> f32 {
    let x = (seed * 12.9898 + 78.233).sin() * 43758.5453123;
    let t = x - x.floor(); // fract() keeps the sign, we want [0, 1)
    let t = (t as f32).min(1.0 - f32::EPSILON);
    min + (max - min) * t
}

/// Integer-valued draw in `[min, max - 1]`, i.e. `floor(random(min, max, seed))`.
pub fn random_count(min: f32, max: f32, seed: f64) -> usize {
    random(min, max, seed).floor().max(0.0) as usize
}

// lattice hash for the value noise, in [0, 1)
fn lattice(p: Vec3) -> f32 {
    let h = (p.x as f64 * 127.1 + p.y as f64 * 311.7 + p.z as f64 * 74.7).sin() * 43758.5453123;
    (h - h.floor()) as f32
}

/// Coherent 3D value noise in `[-1, 1]`.
/// Trilinear blend of hashed lattice values with a smoothstep fade.
pub fn noise3d(x: f32, y: f32, z: f32) -> f32 {
    let p = Vec3::new(x, y, z);
    let i = p.floor();
    let f = p - i;

    // smooth interpolation
    let u = f * f * (Vec3::splat(3.0) - f * 2.0);

    let n000 = lattice(i);
    let n100 = lattice(i + Vec3::X);
    let n010 = lattice(i + Vec3::Y);
    let n110 = lattice(i + Vec3::new(1.0, 1.0, 0.0));
    let n001 = lattice(i + Vec3::Z);
    let n101 = lattice(i + Vec3::new(1.0, 0.0, 1.0));
    let n011 = lattice(i + Vec3::new(0.0, 1.0, 1.0));
    let n111 = lattice(i + Vec3::ONE);

    let nx00 = n000 + (n100 - n000) * u.x;
    let nx10 = n010 + (n110 - n010) * u.x;
    let nx01 = n001 + (n101 - n001) * u.x;
    let nx11 = n011 + (n111 - n011) * u.x;

    let nxy0 = nx00 + (nx10 - nx00) * u.y;
    let nxy1 = nx01 + (nx11 - nx01) * u.y;

    let n = nxy0 + (nxy1 - nxy0) * u.z;
    (n * 2.0 - 1.0).clamp(-1.0, 1.0)
}

/// Noise remapped to `[0, 1]`, sampled at `(x, y, z) * scale`.
pub fn get_noise(x: f32, y: f32, z: f32, scale: f32) -> f32 {
    (noise3d(x * scale, y * scale, z * scale) + 1.0) / 2.0
}
