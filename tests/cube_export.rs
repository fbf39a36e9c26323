//! Integration tests for exporting cubes
//!
//! SEG-Y output needs a geometry library, so these tests register a writer
//! that stores the cube geometry only.

use eyre::Result;
use fmu_dataio::objects::{Cube, DataClass, GeoObject};
use fmu_dataio::{ExportData, FormatWriter, GlobalConfig, Verbosity};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = "tests/data/drogon/global_config2/global_variables.yml";
const CASEPATH: &str = "tests/data/drogon/ertrun1";

struct SegyGeometryWriter;

impl FormatWriter for SegyGeometryWriter {
    fn format(&self) -> &str {
        "segy"
    }

    fn supports(&self, class: DataClass) -> bool {
        class == DataClass::Cube
    }

    fn write(&self, object: &GeoObject, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string(&object.spec())?)?;
        Ok(())
    }
}

fn drogon_config() -> GlobalConfig {
    GlobalConfig::read(CONFIG).unwrap()
}

fn read_metadata(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_yaml::from_str(&content).unwrap()
}

fn copy_dir(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).unwrap();
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
}

#[test]
#[serial_test::serial]
fn test_cube_io() {
    let temp = TempDir::new().unwrap();
    let cube = Cube::new(5, 8, 3).with_constant(0.0);

    let exp = ExportData::new()
        .with_content("depth")
        .with_name("testcube")
        .with_export_root(temp.path())
        .with_pwd(temp.path())
        .with_writer(SegyGeometryWriter);
    exp.to_file(&cube.into()).unwrap();

    assert!(temp.path().join("cubes/.testcube.segy.yml").is_file());
    assert!(temp.path().join("cubes/testcube.segy").is_file());
}

#[test]
#[serial_test::serial]
fn test_cube_io_larger_case() {
    let temp = TempDir::new().unwrap();
    let cube = Cube::new(33, 44, 22).with_constant(0.0);

    let exp = ExportData::new()
        .with_config(drogon_config())
        .with_content("time")
        .with_name("Volantis")
        .with_unit("m")
        .with_vertical_domain("time", "msl")
        .unwrap()
        .with_is_prediction(true)
        .with_is_observation(false)
        .with_tagname("what Descr")
        .with_verbosity(Verbosity::Info)
        .with_export_root(temp.path())
        .with_pwd(temp.path())
        .with_writer(SegyGeometryWriter);
    exp.to_file_with_verbosity(&cube.into(), Verbosity::Debug)
        .unwrap();

    let metadataout = temp.path().join("cubes/.volantis--what_descr.segy.yml");
    assert!(metadataout.is_file());

    let meta = read_metadata(&metadataout);
    assert_eq!(meta["class"], "cube");
    assert_eq!(meta["data"]["vertical_domain"], "time");
    assert_eq!(meta["data"]["depth_reference"], "msl");
    assert_eq!(meta["data"]["spec"]["ncol"], 33);
    assert_eq!(meta["masterdata"]["smda"]["country"][0]["identifier"], "Norway");
    assert_eq!(meta["access"]["asset"]["name"], "Drogon");
}

#[test]
#[serial_test::serial]
fn test_cubeprop_io_larger_case() {
    let temp = TempDir::new().unwrap();
    let cube = Cube::new(2, 7, 13);

    let exp = ExportData::new()
        .with_name("poro")
        .with_config(drogon_config())
        .with_content(serde_json::json!({"property": {"attribute": "porosity"}}))
        .with_unit("fraction")
        .with_vertical_domain("depth", "msl")
        .unwrap()
        .with_tagname("porotag")
        .with_export_root(temp.path())
        .with_pwd(temp.path())
        .with_writer(SegyGeometryWriter);
    exp.to_file(&cube.into()).unwrap();

    let metadataout = temp.path().join("cubes/.poro--porotag.segy.yml");
    assert!(metadataout.is_file());

    let meta = read_metadata(&metadataout);
    assert_eq!(meta["data"]["content"], "property");
    assert_eq!(meta["data"]["property"]["attribute"], "porosity");
    assert_eq!(meta["data"]["unit"], "fraction");
}

#[test]
#[serial_test::serial]
fn test_cube_io_larger_case_ertrun() {
    let temp = TempDir::new().unwrap();
    let current = temp.path().join("scratch/fields/user");
    copy_dir(Path::new(CASEPATH), &current.join("mycase"));

    let runfolder = current.join("mycase/realization-0/iter-0/rms/model");
    std::fs::create_dir_all(&runfolder).unwrap();
    let out = current.join("mycase/realization-0/iter-0/share/results/cubes");

    let exp = ExportData::new()
        .with_config(drogon_config())
        .with_name("Volantis")
        .with_content("depth")
        .with_unit("m")
        .with_vertical_domain("depth", "msl")
        .unwrap()
        .with_is_prediction(true)
        .with_is_observation(false)
        .with_tagname("what Descr")
        .with_verbosity(Verbosity::Info)
        .with_runfolder(&runfolder)
        .with_workflow("my current workflow")
        .with_export_root("../../share/results")
        .with_writer(SegyGeometryWriter);

    let cube = Cube::new(23, 12, 5);
    exp.to_file(&cube.into()).unwrap();

    let metadataout = out.join(".volantis--what_descr.segy.yml");
    assert!(metadataout.is_file());

    let meta = read_metadata(&metadataout);
    assert_eq!(
        meta["file"]["relative_path"],
        "realization-0/iter-0/share/results/cubes/volantis--what_descr.segy"
    );
    assert_eq!(meta["fmu"]["model"]["name"], "ff");
    assert_eq!(meta["fmu"]["iteration"]["name"], "iter-0");
    assert_eq!(meta["fmu"]["realization"]["name"], "realization-0");
    assert_eq!(meta["data"]["stratigraphic"], false);
    assert_eq!(meta["data"]["bbox"]["xmin"], 0.0);
    assert_eq!(meta["data"]["bbox"]["xmax"], 550.0);

    assert_eq!(meta["fmu"]["case"]["name"], "somecasename");
    assert_eq!(
        meta["fmu"]["case"]["uuid"],
        "a40b05e8-e47f-47b1-8fee-f52a5116bd37"
    );
    assert_eq!(meta["fmu"]["workflow"]["reference"], "my current workflow");
    assert_eq!(
        meta["fmu"]["realization"]["parameters"]["GLOBVAR"]["VOLON_PERMH_CHANNEL"],
        1100
    );
}
