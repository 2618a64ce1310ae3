use std::collections::HashMap;

use lazy_static::lazy_static;

use super::error::PlacementError;

type Result<T> = std::result::Result<T,PlacementError>;

// raw threshold -> matrix latency unit, capacity thresholds are not scaled
pub const LATENCY_UNIT:f64 = 0.025/2.0;

pub const DEFAULT_CLOUD_LATENCY:f64 = 100000.0;
pub const DEFAULT_CLOUD_CAPACITY:f64 = 25.0;

#[derive(Clone,Copy,Debug,PartialEq)]
pub struct ServiceLevel {
    pub max_latency:f64,
    pub min_capacity:f64,
}

impl ServiceLevel {
    pub const fn new(max_latency:f64,min_capacity:f64) -> Self {
        Self {max_latency,min_capacity}
    }
    // strict on both sides, a link exactly on a bound fails
    pub fn admits(&self,latency:f64,capacity:f64) -> bool {
        latency < self.max_latency && capacity > self.min_capacity
    }
    fn scaled(&self) -> Self {
        Self {max_latency:self.max_latency*LATENCY_UNIT,min_capacity:self.min_capacity}
    }
}

// raw caller units, edge is node to fog, cloud is fog to cloud
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Sla {
    pub edge:ServiceLevel,
    pub cloud:ServiceLevel,
}

impl Sla {
    pub const fn new(l_max:f64,c_min:f64,l_cloud_fog:f64,c_cloud_fog:f64) -> Self {
        Self {
            edge:ServiceLevel::new(l_max, c_min),
            cloud:ServiceLevel::new(l_cloud_fog, c_cloud_fog),
        }
    }
    pub fn for_profile(profile:&ApplicationProfile) -> Self {
        Self::new(profile.max_latency, profile.min_capacity, DEFAULT_CLOUD_LATENCY, DEFAULT_CLOUD_CAPACITY)
    }
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("L_max",self.edge.max_latency),
            ("C_min",self.edge.min_capacity),
            ("L_cloud_fog",self.cloud.max_latency),
            ("C_cloud_fog",self.cloud.min_capacity),
        ];
        for (name,value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(PlacementError::NegativeThreshold { name, value })
            }
        }
        Ok(())
    }
    pub fn scaled(&self) -> Result<ScaledSla> {
        self.validate()?;
        Ok(ScaledSla {edge:self.edge.scaled(),cloud:self.cloud.scaled()})
    }
}

// only built by Sla::scaled
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct ScaledSla {
    edge:ServiceLevel,
    cloud:ServiceLevel,
}

impl ScaledSla {
    pub fn edge(&self) -> &ServiceLevel {
        &self.edge
    }
    pub fn cloud(&self) -> &ServiceLevel {
        &self.cloud
    }
}

#[derive(Clone,Debug,PartialEq)]
pub struct ApplicationProfile {
    pub name:&'static str,
    pub max_latency:f64,
    pub min_capacity:f64,
}

lazy_static! {
    // keyed by the identifiers the experiment harness uses, plus english aliases
    static ref APPLICATION_PROFILES:HashMap<&'static str,ApplicationProfile> = {
        let iot = ApplicationProfile {name:"IoT Industrial",max_latency:15.0,min_capacity:0.1};
        let streaming = ApplicationProfile {name:"Streaming de Vídeo 4K",max_latency:70.0,min_capacity:3.2};
        let gaming = ApplicationProfile {name:"Jogos Online (Cloud Gaming)",max_latency:20.0,min_capacity:4.0};
        let video = ApplicationProfile {name:"Videoconferência (HD)",max_latency:100.0,min_capacity:1.5};
        let mut profiles = HashMap::with_capacity(6);
        profiles.insert("iot_industrial",iot);
        profiles.insert("streaming_4k",streaming);
        profiles.insert("jogos_online",gaming.clone());
        profiles.insert("cloud_gaming",gaming);
        profiles.insert("videoconferencia_hd",video.clone());
        profiles.insert("videoconference_hd",video);
        profiles
    };
}

impl ApplicationProfile {
    pub fn by_key(key:&str) -> Option<&'static ApplicationProfile> {
        APPLICATION_PROFILES.get(key)
    }
    pub fn keys() -> impl Iterator<Item = &'static str> {
        let mut keys:Vec<&'static str> = APPLICATION_PROFILES.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_is_strict() {
        let level = ServiceLevel::new(1.0, 2.0);
        assert!(level.admits(0.5, 2.5));
        assert!(!level.admits(1.0, 2.5));
        assert!(!level.admits(0.5, 2.0));
        assert!(!level.admits(1.5, 1.0));
    }
    #[test]
    fn test_scaling_only_touches_latency() {
        let sla = Sla::new(20.0, 4.0, 100.0, 25.0).scaled().unwrap();
        assert!((sla.edge().max_latency - 0.25).abs() < 1e-12);
        assert!((sla.cloud().max_latency - 1.25).abs() < 1e-12);
        assert_eq!(sla.edge().min_capacity,4.0);
        assert_eq!(sla.cloud().min_capacity,25.0);
    }
    #[test]
    fn test_negative_threshold() {
        let err = Sla::new(20.0, -1.0, 100.0, 25.0).scaled().unwrap_err();
        assert_eq!(err,PlacementError::NegativeThreshold { name: "C_min", value: -1.0 });
        assert!(Sla::new(f64::NAN, 1.0, 1.0, 1.0).validate().is_err());
        assert!(Sla::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());
    }
    #[test]
    fn test_profiles() {
        let iot = ApplicationProfile::by_key("iot_industrial").unwrap();
        assert_eq!(iot.max_latency,15.0);
        let sla = Sla::for_profile(iot);
        assert_eq!(sla.cloud,ServiceLevel::new(DEFAULT_CLOUD_LATENCY, DEFAULT_CLOUD_CAPACITY));
        assert_eq!(ApplicationProfile::by_key("cloud_gaming"),ApplicationProfile::by_key("jogos_online"));
        assert!(ApplicationProfile::by_key("unknown").is_none());
        assert_eq!(ApplicationProfile::keys().count(),6);
    }
}
