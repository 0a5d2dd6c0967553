use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use csv::QuoteStyle;
use serde::Serialize;
use zip::ZipArchive;

use super::feed_rows::{FrequencyRow, ShapeRow, StopTimeRow, TripRow};
use super::OutputError;
use crate::model::Feed;

pub const TRIPS_FILENAME: &str = "trips.txt";
pub const STOP_TIMES_FILENAME: &str = "stop_times.txt";
pub const FREQUENCIES_FILENAME: &str = "frequencies.txt";
pub const SHAPES_FILENAME: &str = "shapes.txt";

/// files regenerated from the in-memory [`Feed`]. every other file of the
/// input feed is copied through unchanged.
const WRITTEN_FILES: [&str; 4] = [
    TRIPS_FILENAME,
    STOP_TIMES_FILENAME,
    FREQUENCIES_FILENAME,
    SHAPES_FILENAME,
];

/// writes a [`Feed`] back out as a GTFS directory.
pub struct FeedWriter {
    output_directory: PathBuf,
    overwrite: bool,
}

impl FeedWriter {
    pub fn new(output_directory: &Path, overwrite: bool) -> Self {
        Self {
            output_directory: output_directory.to_path_buf(),
            overwrite,
        }
    }

    /// writes the trips, stop times, frequencies and shapes of `feed` and
    /// copies the remaining files of the GTFS `input` (a directory or zip
    /// archive) next to them.
    pub fn write(&self, feed: &Feed, input: &Path) -> Result<(), OutputError> {
        std::fs::create_dir_all(&self.output_directory).map_err(|source| {
            OutputError::IoError {
                filename: self.output_directory.to_string_lossy().to_string(),
                source,
            }
        })?;
        self.write_trips(feed)?;
        self.write_stop_times(feed)?;
        self.write_frequencies(feed)?;
        if !feed.shapes.is_empty() {
            self.write_shapes(feed)?;
        }
        let copied = if input.is_dir() {
            self.copy_from_directory(input)?
        } else {
            self.copy_from_archive(input)?
        };
        log::info!(
            "wrote {} trips to {} ({copied} files copied unchanged)",
            feed.trip_count(),
            self.output_directory.to_string_lossy()
        );
        Ok(())
    }

    pub fn write_trips(&self, feed: &Feed) -> Result<(), OutputError> {
        let rows = feed.trips.values().map(TripRow::from);
        self.write_rows(TRIPS_FILENAME, rows)
    }

    pub fn write_stop_times(&self, feed: &Feed) -> Result<(), OutputError> {
        let rows = feed.trips.values().flat_map(|trip| {
            trip.stop_times
                .iter()
                .map(move |st| StopTimeRow::new(&trip.id, st))
        });
        self.write_rows(STOP_TIMES_FILENAME, rows)
    }

    pub fn write_frequencies(&self, feed: &Feed) -> Result<(), OutputError> {
        let rows = feed.trips.values().flat_map(|trip| {
            trip.frequencies
                .iter()
                .map(move |f| FrequencyRow::new(&trip.id, f))
        });
        self.write_rows(FREQUENCIES_FILENAME, rows)
    }

    pub fn write_shapes(&self, feed: &Feed) -> Result<(), OutputError> {
        let rows = feed.shapes.iter().flat_map(|(shape_id, points)| {
            points.iter().map(move |p| ShapeRow::new(shape_id, p))
        });
        self.write_rows(SHAPES_FILENAME, rows)
    }

    fn write_rows<T: Serialize>(
        &self,
        filename: &str,
        rows: impl Iterator<Item = T>,
    ) -> Result<(), OutputError> {
        let mut writer = self.create_writer(filename)?;
        let csv_error = |source| OutputError::CsvError {
            filename: filename.to_string(),
            source,
        };
        for row in rows {
            writer.serialize(row).map_err(csv_error)?;
        }
        writer.flush().map_err(|source| OutputError::IoError {
            filename: filename.to_string(),
            source,
        })
    }

    /// builds a csv writer for `filename` in the output directory, respecting
    /// the overwrite preference.
    fn create_writer(&self, filename: &str) -> Result<csv::Writer<BufWriter<File>>, OutputError> {
        let filepath = self.output_directory.join(filename);
        if filepath.exists() && !self.overwrite {
            return Err(OutputError::FileExists(filepath));
        }
        let file = File::create(&filepath).map_err(|source| OutputError::IoError {
            filename: filename.to_string(),
            source,
        })?;
        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(BufWriter::new(file));
        Ok(writer)
    }

    fn copy_from_directory(&self, input: &Path) -> Result<usize, OutputError> {
        let io_error = |source| OutputError::IoError {
            filename: input.to_string_lossy().to_string(),
            source,
        };
        let mut copied = 0;
        for entry in std::fs::read_dir(input).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let Some(filename) = passthrough_name(&path) else {
                continue;
            };
            if !path.is_file() {
                continue;
            }
            if is_same_file(&path, &self.output_directory.join(&filename)) {
                log::debug!("{filename} is already in place, skipping copy");
                continue;
            }
            let target = self.target_path(&filename)?;
            std::fs::copy(&path, &target).map_err(|source| OutputError::IoError {
                filename: filename.clone(),
                source,
            })?;
            copied += 1;
        }
        Ok(copied)
    }

    fn copy_from_archive(&self, input: &Path) -> Result<usize, OutputError> {
        let archive_name = input.to_string_lossy().to_string();
        let zip_error = |source| OutputError::ZipError {
            filename: archive_name.clone(),
            source,
        };
        let file = File::open(input).map_err(|source| OutputError::IoError {
            filename: archive_name.clone(),
            source,
        })?;
        let mut archive = ZipArchive::new(file).map_err(zip_error)?;

        let mut seen = HashSet::new();
        let mut copied = 0;
        for i in 0..archive.len() {
            let mut file_in_zip = archive.by_index(i).map_err(zip_error)?;
            if file_in_zip.is_dir() {
                continue;
            }
            // feeds are sometimes zipped with an enclosing folder
            let Some(filename) = passthrough_name(Path::new(file_in_zip.name())) else {
                continue;
            };
            if !seen.insert(filename.clone()) {
                log::warn!("{archive_name} contains {filename} more than once, keeping the first");
                continue;
            }
            let target = self.target_path(&filename)?;
            let io_error = |source| OutputError::IoError {
                filename: filename.clone(),
                source,
            };
            let mut out = File::create(&target).map_err(io_error)?;
            std::io::copy(&mut file_in_zip, &mut out).map_err(io_error)?;
            copied += 1;
        }
        Ok(copied)
    }

    fn target_path(&self, filename: &str) -> Result<PathBuf, OutputError> {
        let target = self.output_directory.join(filename);
        if target.exists() && !self.overwrite {
            return Err(OutputError::FileExists(target));
        }
        Ok(target)
    }
}

/// true if both paths resolve to one existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// the bare file name of an input feed entry, or None if the entry is one
/// of the files regenerated from the feed.
fn passthrough_name(path: &Path) -> Option<String> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    if WRITTEN_FILES.contains(&filename.as_str()) {
        None
    } else {
        Some(filename)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use gtfs_structures::{ContinuousPickupDropOff, Gtfs};

    use super::*;
    use crate::model::test_fixtures::{hms, mock_feed, mock_frequency_trip, mock_trip};
    use crate::model::time_ops::parse_gtfs_time;
    use crate::model::{Frequency, ShapePoint};

    fn scratch_directory(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("gtfs_freqmin_test")
            .join(format!("{name}_{}", std::process::id()));
        if dir.exists() {
            std::fs::remove_dir_all(&dir).expect("test invariant failed: clear scratch dir");
        }
        std::fs::create_dir_all(&dir).expect("test invariant failed: create scratch dir");
        dir
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        let mut reader = csv::Reader::from_path(path).expect("test invariant failed: open csv");
        reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .expect("test invariant failed: read csv")
    }

    fn sample_feed() -> Feed {
        let mut feed = mock_feed(vec![
            mock_trip("b", hms(9, 0, 0)),
            mock_frequency_trip(
                "a",
                vec![Frequency::new(hms(8, 0, 0), hms(8, 30, 0), 600, true)],
            ),
        ]);
        feed.shapes.insert(
            String::from("s1"),
            vec![
                ShapePoint::new(40.0, -105.0, 1, Some(0.0)),
                ShapePoint::new(40.1, -105.0, 2, None),
            ],
        );
        feed
    }

    #[test]
    fn test_write_directory_feed() {
        let input = scratch_directory("input_dir");
        std::fs::write(input.join("agency.txt"), "agency_id,agency_name\n1,Metro\n")
            .expect("test invariant failed: write agency");
        std::fs::write(input.join("trips.txt"), "stale")
            .expect("test invariant failed: write trips");
        let output = scratch_directory("output_dir");

        FeedWriter::new(&output, true)
            .write(&sample_feed(), &input)
            .expect("write should succeed");

        let trips = read_rows(&output.join(TRIPS_FILENAME));
        assert_eq!(trips.len(), 2);
        assert_eq!(&trips[0][2], "a");
        assert_eq!(&trips[1][2], "b");

        let stop_times = read_rows(&output.join(STOP_TIMES_FILENAME));
        assert_eq!(stop_times.len(), 6);
        assert_eq!(&stop_times[0][0], "a");
        assert_eq!(&stop_times[1][1], "08:04:00");
        assert_eq!(&stop_times[1][2], "08:04:30");
        assert_eq!(&stop_times[3][0], "b");

        let frequencies = read_rows(&output.join(FREQUENCIES_FILENAME));
        assert_eq!(frequencies.len(), 1);
        assert_eq!(
            parse_gtfs_time(&frequencies[0][2]),
            Some(hms(8, 30, 0))
        );
        assert_eq!(&frequencies[0][3], "600");
        assert_eq!(&frequencies[0][4], "1");

        let shapes = read_rows(&output.join(SHAPES_FILENAME));
        assert_eq!(shapes.len(), 2);
        assert_eq!(&shapes[1][4], "");

        let agency = std::fs::read_to_string(output.join("agency.txt"))
            .expect("agency.txt is copied");
        assert!(agency.contains("Metro"));
    }

    #[test]
    fn test_writing_into_the_input_directory_keeps_other_files() {
        let dir = scratch_directory("in_place");
        std::fs::write(dir.join("agency.txt"), "agency_id,agency_name\n1,Metro\n")
            .expect("test invariant failed: write agency");
        std::fs::write(dir.join("trips.txt"), "stale")
            .expect("test invariant failed: write trips");

        FeedWriter::new(&dir, true)
            .write(&sample_feed(), &dir)
            .expect("write should succeed");

        let agency = std::fs::read_to_string(dir.join("agency.txt"))
            .expect("test invariant failed: agency.txt exists");
        assert_eq!(agency, "agency_id,agency_name\n1,Metro\n");
        assert_eq!(read_rows(&dir.join(TRIPS_FILENAME)).len(), 2);
    }

    #[test]
    fn test_written_feed_reads_back_unchanged() {
        let input = scratch_directory("round_trip_input");
        let static_files = [
            (
                "agency.txt",
                "agency_id,agency_name,agency_url,agency_timezone\n1,Metro,https://example.com,America/Denver\n",
            ),
            (
                "stops.txt",
                "stop_id,stop_name,stop_lat,stop_lon\nstop_a,A,40.0,-105.0\nstop_b,B,40.05,-105.0\nstop_c,C,40.1,-105.0\n",
            ),
            (
                "routes.txt",
                "route_id,agency_id,route_short_name,route_long_name,route_type\nr1,1,1,One,3\n",
            ),
            (
                "calendar.txt",
                "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\nweekday,1,1,1,1,1,0,0,20240101,20241231\n",
            ),
        ];
        for (filename, contents) in static_files {
            std::fs::write(input.join(filename), contents)
                .expect("test invariant failed: write static file");
        }
        let mut feed = sample_feed();
        let trip = feed.get_trip_mut("a").expect("test invariant failed: trip a");
        trip.stop_times[1].continuous_pickup = ContinuousPickupDropOff::Continuous;
        trip.stop_times[1].continuous_drop_off = ContinuousPickupDropOff::CoordinateWithDriver;

        let output = scratch_directory("round_trip_output");
        FeedWriter::new(&output, false)
            .write(&feed, &input)
            .expect("write should succeed");

        let gtfs = Gtfs::new(output.to_str().expect("test invariant failed: utf-8 path"))
            .expect("written feed should be readable");
        let reread = Feed::from(gtfs);
        let stop_time = &reread.get_trip("a").expect("trip a is written").stop_times[1];
        assert_eq!(stop_time.continuous_pickup, ContinuousPickupDropOff::Continuous);
        assert_eq!(
            stop_time.continuous_drop_off,
            ContinuousPickupDropOff::CoordinateWithDriver
        );
        assert_eq!(reread.trips, feed.trips);
    }

    #[test]
    fn test_existing_output_without_overwrite_fails() {
        let input = scratch_directory("input_existing");
        let output = scratch_directory("output_existing");
        std::fs::write(output.join(TRIPS_FILENAME), "").expect("test invariant failed");
        let result = FeedWriter::new(&output, false).write(&sample_feed(), &input);
        assert!(matches!(result, Err(OutputError::FileExists(_))));
    }

    #[test]
    fn test_zip_entries_are_copied_through() {
        let input_dir = scratch_directory("input_zip");
        let archive_path = input_dir.join("feed.zip");
        {
            let file = File::create(&archive_path).expect("test invariant failed: create zip");
            let mut zip = zip::ZipWriter::new(file);
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file("feed/calendar.txt", options)
                .expect("test invariant failed: start calendar");
            zip.write_all(b"service_id\nweekday\n")
                .expect("test invariant failed: write calendar");
            zip.start_file("feed/stop_times.txt", options)
                .expect("test invariant failed: start stop_times");
            zip.write_all(b"stale").expect("test invariant failed");
            zip.finish().expect("test invariant failed: finish zip");
        }
        let output = scratch_directory("output_zip");
        FeedWriter::new(&output, false)
            .write(&sample_feed(), &archive_path)
            .expect("write should succeed");

        let calendar =
            std::fs::read_to_string(output.join("calendar.txt")).expect("calendar.txt is copied");
        assert!(calendar.contains("weekday"));
        assert_eq!(read_rows(&output.join(STOP_TIMES_FILENAME)).len(), 6);
    }
}
