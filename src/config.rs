use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::time::beat::DEFAULT_BEAT_DIVISIONS;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum BakeStrategy {
  #[serde(rename = "symmetric")]
  StepSymmetric,
  #[serde(rename = "asymmetric")]
  StepAsymmetric,
  #[serde(rename = "lerp")]
  LerpRound,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Editor {
  pub default_hold_length: f32,
  pub default_bake_strategy: BakeStrategy,
}

impl Default for Editor {
  fn default() -> Editor {
    Editor {
      default_hold_length: 1.0,
      default_bake_strategy: BakeStrategy::LerpRound,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Quantization {
  pub beat_divisions: u32,
}

impl Default for Quantization {
  fn default() -> Quantization {
    Quantization {
      beat_divisions: DEFAULT_BEAT_DIVISIONS,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub editor: Editor,
  pub quantization: Quantization,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      editor: Editor::default(),
      quantization: Quantization::default(),
    }
  }
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}
