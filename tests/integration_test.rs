use auroran::prelude::*;
use std::io::Write;
use tempfile::tempdir;

fn write_temp(dir: &std::path::Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn read_2da_from_disk() {
    let dir = tempdir().unwrap();
    let path = write_temp(
        dir.path(),
        "feats.2da",
        b"2DA V2.0\n\
          Default: 0\n\
          Label      Cost\n\
          0 cleave   2\n\
          1 ****     ****\n",
    );

    let table = TwoDaFile::open(&path).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.get_row(0).string("Label"), "cleave");
    assert_eq!(table.get_row(1).int("Cost"), 0);
}

#[test]
fn dump_2da_and_read_back() {
    let dir = tempdir().unwrap();
    let source = write_temp(
        dir.path(),
        "items.2da",
        b"2DA V2.0\n\
          \n\
          Name Value\n\
          0 \"short sword\" 7\n",
    );
    let dumped = dir.path().join("items_dump.2da");

    let table = TwoDaFile::open(&source).unwrap();
    table.dump_to_path(&dumped).unwrap();

    let reparsed = TwoDaFile::open(&dumped).unwrap();
    assert_eq!(reparsed.get_row(0).string("Name"), "short sword");
    assert_eq!(reparsed.get_row(0).int("Value"), 7);
}

#[test]
fn utf16_wrapped_header_is_recognized() {
    // The same table with its two header tags widened to UTF-16LE
    let mut data = Vec::new();
    for b in b"2DA V2.0" {
        data.push(*b);
        data.push(0);
    }
    data.extend_from_slice(b"\nDefault: 1\nA\n0 x\n");

    let mut stream = MemoryStream::new(data);
    let table = TwoDaFile::read(&mut stream).unwrap();
    assert_eq!(table.get_row(0).string("A"), "x");
    assert_eq!(table.default_string(), "1");
}

#[test]
fn extract_2da_out_of_herf_archive() {
    let table_bytes: &[u8] = b"2DA V2.0\n\nValue\n0 42\n";
    let name_hash = hash_string_djb2("stats.2da");

    // Archive header 8 + one record 12 = data at 20
    let mut archive = Vec::new();
    archive.extend_from_slice(&0x00F1_A5C0u32.to_le_bytes());
    archive.extend_from_slice(&1u32.to_le_bytes());
    archive.extend_from_slice(&name_hash.to_le_bytes());
    archive.extend_from_slice(&(table_bytes.len() as u32).to_le_bytes());
    archive.extend_from_slice(&20u32.to_le_bytes());
    archive.extend_from_slice(table_bytes);

    let dir = tempdir().unwrap();
    let path = write_temp(dir.path(), "client.herf", &archive);

    let herf = HerfFile::open(&path).unwrap();
    let index = herf.find("stats.2da").unwrap();

    let mut resource = herf.resource(index).unwrap();
    let table = TwoDaFile::read(&mut resource).unwrap();
    assert_eq!(table.get_row(0).int("Value"), 42);
}

#[test]
fn tlk_from_disk_with_language_probe() {
    // Minimal V3 table with one present string
    let text = b"Greetings";
    let mut data = Vec::new();
    data.extend_from_slice(b"TLK V3.0");
    data.extend_from_slice(&0u32.to_le_bytes()); // language ID
    data.extend_from_slice(&1u32.to_le_bytes()); // string count
    data.extend_from_slice(&60u32.to_le_bytes()); // strings offset

    data.extend_from_slice(&0x1u32.to_le_bytes()); // flags: text present
    data.extend_from_slice(&[0u8; 16]); // sound resref
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes()); // offset into strings
    data.extend_from_slice(&(text.len() as u32).to_le_bytes());
    data.extend_from_slice(&0f32.to_le_bytes());
    data.extend_from_slice(text);

    let dir = tempdir().unwrap();
    let path = write_temp(dir.path(), "dialog.tlk", &data);

    assert_eq!(read_language_id_from_path(&path), Some(0));

    let encoding = Encoding::for_label(b"windows-1252");
    let mut tlk = TlkFile::open(&path, encoding).unwrap();
    assert_eq!(tlk.string(0).unwrap(), "Greetings");
    assert_eq!(tlk.string(1).unwrap(), "");
}

#[test]
fn buffered_file_stream_reads_like_memory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    {
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..10_000u32 {
            file.write_all(&i.to_le_bytes()).unwrap();
        }
    }

    let mut stream = BufferedStream::new(FileStream::open(&path).unwrap());
    assert_eq!(stream.size(), 40_000);

    stream.seek_to(4 * 9_999).unwrap();
    let tail = stream.read_exact_vec(4).unwrap();
    assert_eq!(u32::from_le_bytes(tail.try_into().unwrap()), 9_999);

    stream.seek_to(0).unwrap();
    let head = stream.read_exact_vec(8).unwrap();
    assert_eq!(&head[..4], &0u32.to_le_bytes());
    assert_eq!(&head[4..], &1u32.to_le_bytes());
}
