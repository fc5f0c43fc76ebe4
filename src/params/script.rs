//! Ring script generator configuration (TOML).

use serde::Deserialize;

use crate::error::{NebulaError, Result};

/// One concentric ring of particle spawns
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ring {
    /// Distance from the centre (pixels)
    pub radius: f32,

    /// Linear RGB colour before intensity scaling
    pub colour: [f32; 3],
}

/// Parameters for a generated nebula command stream
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NebulaScript {
    /// Outer steps per particle (1..=500 is the useful range)
    pub iterations: u32,

    /// TONEMAP exposure (0..5)
    pub exposure: f32,

    /// Velocity damping (0..1.2)
    pub damping: f32,

    /// Noise gain (0..10)
    pub noisy: f32,

    /// Random perturbation gain (0..10)
    pub fuzz: f32,

    /// Multiplier applied to every ring colour (0..5)
    pub intensity: f32,

    /// Initial x velocity is drawn from [-initial_vx, initial_vx]
    pub initial_vx: f32,

    /// Initial y velocity is drawn from [-initial_vy, initial_vy]
    pub initial_vy: f32,

    /// Particles spawned per angular position (>= 1)
    pub spawn: u32,

    /// Sub-steps per outer step (>= 1)
    pub step_sample_rate: u32,

    /// Ring centre (pixels)
    pub centre: [f32; 2],

    /// Seed for initial velocities
    pub seed: u64,

    /// Rings, emitted in order
    pub rings: Vec<Ring>,
}

/// A TOML document holding several scripts as `[[scripts]]` tables
#[derive(Debug, Deserialize)]
struct ScriptList {
    #[serde(default)]
    scripts: Vec<NebulaScript>,
}

impl NebulaScript {
    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        let script: Self = toml::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    /// Parse either a `[[scripts]]` list or a single top-level script
    pub fn list_from_toml(text: &str) -> Result<Vec<Self>> {
        let list: ScriptList = toml::from_str(text)?;
        if list.scripts.is_empty() {
            return Ok(vec![Self::from_toml(text)?]);
        }
        for script in &list.scripts {
            script.validate()?;
        }
        Ok(list.scripts)
    }

    /// Reject parameter combinations that cannot produce a stream
    pub fn validate(&self) -> Result<()> {
        if self.spawn == 0 {
            return Err(NebulaError::InvalidParameter(
                "spawn must be at least 1".to_string(),
            ));
        }
        if self.step_sample_rate == 0 {
            return Err(NebulaError::InvalidParameter(
                "step_sample_rate must be at least 1".to_string(),
            ));
        }
        if let Some(ring) = self.rings.iter().find(|r| !(r.radius > 0.0)) {
            return Err(NebulaError::InvalidParameter(format!(
                "ring radius must be positive, got {}",
                ring.radius
            )));
        }
        Ok(())
    }
}

impl Default for NebulaScript {
    fn default() -> Self {
        let ring = |radius: f32, colour: [f32; 3]| Ring { radius, colour };
        Self {
            iterations: 100,
            exposure: 1.0,
            damping: 0.8,
            noisy: 1.0,
            fuzz: 1.0,
            intensity: 1.0,
            initial_vx: 10.0,
            initial_vy: 10.0,
            spawn: 10,
            step_sample_rate: 10,
            centre: [500.0, 500.0],
            seed: 1,
            rings: vec![
                ring(50.0, [1.0, 0.1, 0.1]),
                ring(100.0, [1.0, 0.5, 0.1]),
                ring(150.0, [0.3, 1.0, 0.3]),
                ring(200.0, [0.25, 1.0, 0.75]),
                ring(250.0, [0.2, 0.2, 1.0]),
                ring(300.0, [0.75, 0.25, 1.0]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let script = NebulaScript::from_toml("iterations = 20\nexposure = 2.5\n").unwrap();
        assert_eq!(script.iterations, 20);
        assert_eq!(script.exposure, 2.5);
        assert_eq!(script.spawn, NebulaScript::default().spawn);
        assert_eq!(script.rings.len(), 6);
    }

    #[test]
    fn test_rings_from_toml() {
        let text = r#"
            [[rings]]
            radius = 10.0
            colour = [0.5, 0.5, 0.5]
        "#;
        let script = NebulaScript::from_toml(text).unwrap();
        assert_eq!(
            script.rings,
            vec![Ring {
                radius: 10.0,
                colour: [0.5, 0.5, 0.5]
            }]
        );
    }

    #[test]
    fn test_script_list() {
        let text = r#"
            [[scripts]]
            iterations = 5

            [[scripts]]
            exposure = 3.0
            spawn = 2
        "#;
        let scripts = NebulaScript::list_from_toml(text).unwrap();
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0].iterations, 5);
        assert_eq!(scripts[0].exposure, NebulaScript::default().exposure);
        assert_eq!(scripts[1].spawn, 2);

        // A plain document is a list of one
        let single = NebulaScript::list_from_toml("iterations = 7").unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].iterations, 7);

        let invalid = NebulaScript::list_from_toml("[[scripts]]\nspawn = 0\n");
        assert!(matches!(invalid, Err(NebulaError::InvalidParameter(_))));
    }

    #[test]
    fn test_zero_spawn_rejected() {
        let result = NebulaScript::from_toml("spawn = 0");
        assert!(matches!(result, Err(NebulaError::InvalidParameter(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = NebulaScript::from_toml("iterations = \"many\"");
        assert!(matches!(result, Err(NebulaError::Config(_))));
    }
}
