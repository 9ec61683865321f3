mod request_dto;

pub use request_dto::{
    CreateRequestDto, CreateRequestResponseDto, NearbyQuery, NearbyRequestDto, RequestResponseDto,
    UpdateRequestStatusDto,
};
