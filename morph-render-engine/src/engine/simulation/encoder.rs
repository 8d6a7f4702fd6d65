use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureUsages};
use constants::texture::{INITIAL_FLOW_DIRECTION, SIMULATION_TEXTURE_FORMAT};

/// Side length of the square simulation texture holding `max_count` particles.
pub fn texture_side(max_count: usize) -> u32 {
    let side = (max_count as f64).sqrt().ceil() as u32;
    // Guard against sqrt rounding just below an exact square.
    let side = if (side as usize) * (side as usize) < max_count {
        side + 1
    } else {
        side
    };
    side.max(1)
}

/// Packs positions into `size * size` RGBA texels, `w = 0`, unused slots zeroed.
pub fn encode_positions(positions: &[[f32; 3]], size: u32) -> Vec<[f32; 4]> {
    let slots = (size * size) as usize;
    let mut texels = vec![[0.0; 4]; slots];
    for (texel, position) in texels.iter_mut().zip(positions) {
        *texel = [position[0], position[1], position[2], 0.0];
    }
    texels
}

/// Flow direction seed: `(1, 1, 1, 0)` for every live particle, zero elsewhere.
pub fn initial_flow_direction(max_count: usize, size: u32) -> Vec<[f32; 4]> {
    let slots = (size * size) as usize;
    (0..slots)
        .map(|slot| {
            if slot < max_count {
                INITIAL_FLOW_DIRECTION
            } else {
                [0.0; 4]
            }
        })
        .collect()
}

/// Texel-centre UV of each particle slot, used by the vertex shader to fetch its position.
pub fn reference_uvs(max_count: usize, size: u32) -> Vec<[f32; 2]> {
    let side = size as f32;
    (0..max_count)
        .map(|slot| {
            let x = (slot as u32 % size) as f32;
            let y = (slot as u32 / size) as f32;
            [(x + 0.5) / side, (y + 0.5) / side]
        })
        .collect()
}

/// Storage-capable `Rgba32Float` image with nearest sampling, readable by compute and vertex stages.
pub fn simulation_image(texels: &[[f32; 4]], size: u32) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bytemuck::cast_slice(texels).to_vec(),
        SIMULATION_TEXTURE_FORMAT,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_descriptor.usage |=
        TextureUsages::STORAGE_BINDING | TextureUsages::COPY_SRC | TextureUsages::COPY_DST;
    image.sampler = ImageSampler::nearest();
    image
}
