use crate::prelude::{Config, Error, IntegratorOpts, Propagator, ShellOpts};

use rstest::*;

#[test]
fn default_values() {
    let cfg = Config::default();
    assert_eq!(cfg.kepler_tolerance_arcsec, 0.001);
    assert_eq!(cfg.integrator.rtol, 1.0E-8);
    assert_eq!(cfg.integrator.atol, 1.0E-11);
    assert_eq!(cfg.integrator.t_res_s, 60.0);
    assert_eq!(cfg.integrator.max_steps, 100_000);
    assert_eq!(cfg.shell.height_m, 350.0E3);
    assert_eq!(cfg.shell.earth_radius_m, 6_371_000.0);
    assert_eq!(cfg.shell.radius_m(), 6_721_000.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn presets() {
    let cfg = Config::default().with_shell_height(450.0E3);
    assert_eq!(cfg.shell.radius_m(), 6_821_000.0);
    assert_eq!(cfg.integrator, IntegratorOpts::default());

    let cfg = cfg.with_integrator(IntegratorOpts {
        rtol: 1.0E-10,
        ..Default::default()
    });
    assert_eq!(cfg.integrator.rtol, 1.0E-10);
    assert_eq!(cfg.shell.height_m, 450.0E3);
}

#[rstest]
#[case(Config { kepler_tolerance_arcsec: 0.0, ..Default::default() })]
#[case(Config::default().with_shell_height(-1.0))]
#[case(Config::default().with_shell_height(f64::NAN))]
#[case(Config { shell: ShellOpts { earth_radius_m: 0.0, ..Default::default() }, ..Default::default() })]
#[case(Config::default().with_integrator(IntegratorOpts { rtol: -1.0E-8, ..Default::default() }))]
#[case(Config::default().with_integrator(IntegratorOpts { t_res_s: 0.0, ..Default::default() }))]
#[case(Config::default().with_integrator(IntegratorOpts { max_steps: 0, ..Default::default() }))]
fn invalid(#[case] cfg: Config) {
    assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    assert!(matches!(Propagator::new(cfg), Err(Error::InvalidConfig(_))));
}

#[cfg(feature = "serde")]
mod serdes {
    use crate::prelude::Config;

    #[test]
    fn empty_is_default() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_description() {
        let content = r#"
        {
            "kepler_tolerance_arcsec": 0.01,
            "shell": {
                "height_m": 450000.0
            },
            "integrator": {
                "rtol": 1e-10,
                "max_step_s": 120.0
            }
        }"#;

        let cfg: Config = serde_json::from_str(content).unwrap();
        assert_eq!(cfg.kepler_tolerance_arcsec, 0.01);
        assert_eq!(cfg.shell.height_m, 450.0E3);
        assert_eq!(cfg.shell.earth_radius_m, 6_371_000.0);
        assert_eq!(cfg.integrator.rtol, 1.0E-10);
        assert_eq!(cfg.integrator.atol, 1.0E-11);
        assert_eq!(cfg.integrator.max_step_s, 120.0);
        assert!(cfg.validate().is_ok());
    }
}
