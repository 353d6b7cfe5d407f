use std::fs;
use std::path::{Path, PathBuf};

use sanewire_core::{DeviceRecord, EncodeError, FrameParameters, Status, WireWriter};

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_device_list_fixtures(&root)?;
    write_parameter_fixtures(&root)?;
    write_scalar_fixtures(&root)?;
    Ok(())
}

fn write_device_list_fixtures(root: &Path) -> Result<(), String> {
    let devices = vec![
        device(
            "genesys:libusb:001:004",
            "Canon",
            "LiDE 210",
            "flatbed scanner",
        ),
        device("test:0", "Noname", "frontend-tester", "virtual device"),
    ];
    write_response(root.join("device_list_two"), |w| {
        w.write_device_list(Status::Good, &devices)
    })?;
    write_response(root.join("device_list_empty"), |w| {
        w.write_device_list(Status::Good, &[])
    })?;
    write_response(root.join("device_list_null_pointer"), |w| {
        w.write_status(Status::Good)?;
        w.write_word(2i32)?;
        w.write_pointer(false)?;
        w.write_device_record(&devices[1])?;
        w.write_word(0i32)
    })?;
    Ok(())
}

fn write_parameter_fixtures(root: &Path) -> Result<(), String> {
    write_response(root.join("parameters_rgb"), |w| {
        w.write_parameters(&FrameParameters {
            frame: 1,
            last_frame: true,
            bytes_per_line: 100,
            pixels_per_line: 50,
            lines: 20,
            depth: 8,
        })
    })?;
    // One extra word after the response shows up as unconsumed bytes.
    write_response(root.join("parameters_unknown_lines"), |w| {
        w.write_parameters(&FrameParameters {
            frame: 0,
            last_frame: true,
            bytes_per_line: 300,
            pixels_per_line: 2400,
            lines: -1,
            depth: 1,
        })?;
        w.write_word(0i32)
    })?;
    Ok(())
}

fn write_scalar_fixtures(root: &Path) -> Result<(), String> {
    write_response(root.join("string_latin1"), |w| w.write_string("Caf\u{e9}"))?;
    write_response(root.join("status_device_busy"), |w| {
        w.write_status(Status::DeviceBusy)
    })?;
    Ok(())
}

fn device(name: &str, vendor: &str, model: &str, kind: &str) -> DeviceRecord {
    DeviceRecord {
        name: name.to_string(),
        vendor: vendor.to_string(),
        model: model.to_string(),
        kind: kind.to_string(),
    }
}

fn write_response<F>(dir: PathBuf, build: F) -> Result<(), String>
where
    F: FnOnce(&mut WireWriter<&mut Vec<u8>>) -> Result<(), EncodeError>,
{
    let mut bytes = Vec::new();
    let mut writer = WireWriter::new(&mut bytes);
    build(&mut writer).map_err(|err| format!("encode failed for {}: {}", dir.display(), err))?;
    fs::create_dir_all(&dir)
        .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.bin");
    fs::write(&path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}
