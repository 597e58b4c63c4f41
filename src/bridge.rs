//! Per-frame values published for the JS renderer.
//!
//! The scene (turntable model, background shader) is drawn outside of Rust;
//! it pulls these flat `Float32Array`s once per animation frame.

use bytemuck::cast_slice;
use std::cell::RefCell;
use turntable_core::{ShaderUniforms, TurntablePose};
use wasm_bindgen::prelude::*;

thread_local! {
    static LATEST: RefCell<(TurntablePose, ShaderUniforms)> =
        RefCell::new((TurntablePose::default(), ShaderUniforms::default()));
}

pub fn publish(pose: TurntablePose, uniforms: ShaderUniforms) {
    LATEST.with(|l| *l.borrow_mut() = (pose, uniforms));
}

/// `[vinyl_rotation, vinyl_wobble, vinyl_scale, spin_speed, tonearm_rot_y, tonearm_x, tonearm_z, 0]`
#[wasm_bindgen]
pub fn turntable_pose() -> js_sys::Float32Array {
    LATEST.with(|l| {
        let pose = l.borrow().0;
        js_sys::Float32Array::from(cast_slice::<TurntablePose, f32>(std::slice::from_ref(&pose)))
    })
}

/// Background shader uniform block, laid out as `ShaderUniforms`.
#[wasm_bindgen]
pub fn shader_uniforms() -> js_sys::Float32Array {
    LATEST.with(|l| {
        let uniforms = l.borrow().1;
        js_sys::Float32Array::from(cast_slice::<ShaderUniforms, f32>(std::slice::from_ref(
            &uniforms,
        )))
    })
}
