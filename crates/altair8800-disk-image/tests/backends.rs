use altair8800_disk_image::{FileImage, ImageSource, MemImage, ZeroImage, SECTOR_SIZE};

#[test]
fn mem_image_overlapping_end_of_buffer() {
    let mut img = MemImage::new(vec![7u8; 140]);
    let mut buf = [0u8; SECTOR_SIZE];
    img.read_sector(100, &mut buf).unwrap();
    assert_eq!(&buf[..40], &[7u8; 40]);
    assert_eq!(&buf[40..], &[0u8; SECTOR_SIZE - 40]);
}

#[test]
fn file_image_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disk.img");
    let mut data = vec![0u8; altair8800_disk_image::DISK_SIZE as usize];
    data[altair8800_disk_image::TRACK_SIZE as usize] = 0x42; // first byte of track 1
    std::fs::write(&path, &data).unwrap();

    let mut img = FileImage::open(&path).unwrap();
    assert_eq!(img.size(), altair8800_disk_image::DISK_SIZE);

    let mut buf = [0u8; SECTOR_SIZE];
    img.read_sector(altair8800_disk_image::TRACK_SIZE, &mut buf).unwrap();
    assert_eq!(buf[0], 0x42);
}

#[test]
fn zero_image_never_reports_an_error_regardless_of_offset() {
    let mut img = ZeroImage::new(altair8800_disk_image::DISK_SIZE);
    let mut buf = [0xFFu8; SECTOR_SIZE];
    img.read_sector(u32::MAX - 10, &mut buf).unwrap();
    assert_eq!(buf, [0u8; SECTOR_SIZE]);
}
