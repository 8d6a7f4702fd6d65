use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub models_loaded: bool,
    pub textures_configured: bool,
    pub particles_created: bool,
}

impl LoadingProgress {
    pub fn is_complete(&self) -> bool {
        self.manifest_loaded
            && self.models_loaded
            && self.textures_configured
            && self.particles_created
    }
}
