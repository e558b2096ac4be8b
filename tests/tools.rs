use energy_savings_toolbox::{
    config::{self, Config},
    i18n::Translator,
    tool::{self, CalcError, ToolName},
    ui_cli::{self, FieldKind},
};
use serde_json::{json, Value};

fn sample_input(tool: ToolName) -> Value {
    match tool {
        ToolName::SolarPanels => json!({
            "annualConsumptionKwh": 3500,
            "roofOrientation": "south",
            "roofTiltDeg": 35,
            "panelPowerWp": 400,
            "electricityPrice": 0.40
        }),
        ToolName::HeatPump => json!({
            "annualGasM3": 1500,
            "houseType": "terraced",
            "insulation": "moderate",
            "heatPumpType": "hybrid",
            "gasPrice": 1.20,
            "electricityPrice": 0.30
        }),
        ToolName::AirConditioning => json!({
            "floorAreaM2": 30,
            "ceilingHeightM": 2.6,
            "insulation": "average",
            "application": "cooling"
        }),
        ToolName::HomeBattery => json!({
            "pvPowerKwp": 5,
            "annualConsumptionKwh": 3500,
            "goal": "self-consumption"
        }),
        ToolName::Insulation => json!({
            "houseType": "corner",
            "annualGasM3": 1600,
            "measures": ["roof", "cavity-wall"]
        }),
        ToolName::BoilerReplacement => json!({
            "annualGasM3": 1400,
            "currentBoiler": "reasonable",
            "occupants": 2,
            "desiredSystem": "hybrid"
        }),
        ToolName::EvCharger => json!({
            "batteryCapacityKwh": 60,
            "desiredChargeHours": 8,
            "houseConnection": "3-phase",
            "evModel": "Tesla Model 3"
        }),
        ToolName::EnergyContract => json!({
            "currentElectricityPrice": 0.30,
            "currentGasPrice": 1.30,
            "newElectricityPrice": 0.27,
            "newGasPrice": 1.25,
            "annualElectricityKwh": 2800,
            "annualGasM3": 1100
        }),
        ToolName::WindowFrames => json!({
            "windowAreaM2": 15,
            "frameMaterial": "wood",
            "annualGasM3": 1300
        }),
        ToolName::EnergyLabel => json!({
            "constructionYear": 1985,
            "houseType": "semi-detached",
            "floorAreaM2": 130,
            "roofInsulation": "moderate",
            "wallInsulation": "none",
            "floorInsulation": "none",
            "glazing": "double",
            "heatingSystem": "cv-boiler"
        }),
        ToolName::HotWaterBoiler => json!({
            "occupants": 3,
            "currentSystem": "cv-boiler"
        }),
    }
}

#[test]
fn every_tool_accepts_its_sample_input() {
    for tool in ToolName::ALL {
        let result = tool::run_calculation(tool, sample_input(tool))
            .unwrap_or_else(|e| panic!("{tool}: {e}"));
        assert!(result.is_object(), "{tool}");
    }
}

#[test]
fn results_use_camel_case_fields() {
    let result = tool::run_calculation(ToolName::EvCharger, sample_input(ToolName::EvCharger)).unwrap();
    assert_eq!(result["advisedPowerKw"], json!(11.0));
    assert_eq!(result["maxOnboardChargerKw"], json!(11.0));
    assert_eq!(result["chargeMoment"], json!("flexible"));

    let label = tool::run_calculation(ToolName::EnergyLabel, sample_input(ToolName::EnergyLabel)).unwrap();
    assert!(label["label"].is_string());
    assert!(label["heatLoss"]["walls"].is_number());
}

#[test]
fn same_input_gives_same_output() {
    for tool in ToolName::ALL {
        let a = tool::run_calculation(tool, sample_input(tool)).unwrap();
        let b = tool::run_calculation(tool, sample_input(tool)).unwrap();
        assert_eq!(a, b, "{tool}");
    }
}

#[test]
fn out_of_range_values_are_rejected_with_dutch_messages() {
    let mut input = sample_input(ToolName::SolarPanels);
    input["annualConsumptionKwh"] = json!(60_000);
    input["electricityPrice"] = json!(0.05);
    match tool::run_calculation(ToolName::SolarPanels, input) {
        Err(CalcError::Validation(errors)) => {
            let messages: Vec<(&str, &str)> = errors
                .iter()
                .map(|e| (e.field.as_str(), e.message.as_str()))
                .collect();
            assert!(messages.contains(&("annualConsumptionKwh", "Maximaal 50.000 kWh")));
            assert!(messages.contains(&("electricityPrice", "Minimaal €0.10/kWh")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn insulation_needs_unique_measures() {
    let mut input = sample_input(ToolName::Insulation);
    input["measures"] = json!([]);
    assert!(matches!(
        tool::run_calculation(ToolName::Insulation, input.clone()),
        Err(CalcError::Validation(e)) if e.has_field("measures")
    ));

    input["measures"] = json!(["roof", "roof"]);
    assert!(matches!(
        tool::run_calculation(ToolName::Insulation, input),
        Err(CalcError::Validation(e)) if e.has_field("measures")
    ));
}

#[test]
fn future_construction_year_is_rejected() {
    let mut input = sample_input(ToolName::EnergyLabel);
    input["constructionYear"] = json!(energy_savings_toolbox::validation::current_year() + 1);
    assert!(matches!(
        tool::run_calculation(ToolName::EnergyLabel, input),
        Err(CalcError::Validation(e)) if e.has_field("constructionYear")
    ));
}

#[test]
fn unknown_enum_value_is_invalid_input() {
    let mut input = sample_input(ToolName::HeatPump);
    input["houseType"] = json!("castle");
    assert!(matches!(
        tool::run_calculation(ToolName::HeatPump, input),
        Err(CalcError::InvalidInput(_))
    ));
}

#[test]
fn tool_slugs_round_trip_through_parse() {
    for tool in ToolName::ALL {
        assert_eq!(tool.slug().parse::<ToolName>().unwrap(), tool);
        assert_eq!(tool.i18n_key(), format!("tool.{}", tool.slug()));
    }
}

#[test]
fn language_packs_label_every_form_field() {
    for code in ["nl-nl", "en-us"] {
        let tr = Translator::new(code);
        for tool in ToolName::ALL {
            assert!(tr.lookup(&tool.i18n_key()).is_some(), "{code}: {tool}");
            for field in ui_cli::form(tool) {
                assert!(
                    tr.lookup(&format!("field.{}", field.name)).is_some(),
                    "{code}: {}",
                    field.name
                );
                if let FieldKind::Choice(options) | FieldKind::Multi(options) = field.kind {
                    for option in options {
                        assert!(tr.lookup(&format!("choice.{option}")).is_some(), "{code}: {option}");
                    }
                }
            }
        }
    }
}

#[test]
fn insulation_form_collects_an_investment_per_measure() {
    let form = ui_cli::form(ToolName::Insulation);
    let investments = form.iter().find(|f| f.name == "investments").expect("investments field");
    let FieldKind::PerChoice(source) = investments.kind else {
        panic!("investments should be asked per chosen measure");
    };
    let measures = form.iter().find(|f| f.name == source).expect("measures field");
    let FieldKind::Multi(options) = measures.kind else {
        panic!("measures should be a multi-select");
    };

    for option in options {
        let mut per_measure = serde_json::Map::new();
        per_measure.insert(ui_cli::per_choice_key(option), json!(1234));
        let mut input = sample_input(ToolName::Insulation);
        input["measures"] = json!([option]);
        input["investments"] = Value::Object(per_measure);

        let result = tool::run_calculation(ToolName::Insulation, input).unwrap();
        assert_eq!(result["measures"][0]["investment"], json!(1234.0), "{option}");
        assert_eq!(result["totalInvestment"], json!(1234.0), "{option}");
    }
}

#[test]
fn config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("energy-savings-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(config::CONFIG_FILE);
    let _ = std::fs::remove_file(&path);

    let mut cfg = config::load_or_create(&path).unwrap();
    assert_eq!(cfg, Config::default());
    cfg.language = Some("en-us".into());
    cfg.prices.gas = 1.45;
    cfg.save_to(&path).unwrap();

    let loaded = config::load_or_create(&path).unwrap();
    assert_eq!(loaded.language.as_deref(), Some("en-us"));
    assert!((loaded.prices.gas - 1.45).abs() < 1e-9);
    std::fs::remove_dir_all(&dir).unwrap();
}
